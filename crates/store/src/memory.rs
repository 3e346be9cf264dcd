//! In-memory player storage.

use async_trait::async_trait;
use dashmap::DashMap;
use echoes_domain::PlayerState;

use crate::{PlayerRepo, StoreError};

/// Process-local store. State is lost on exit; used by tests and when no
/// database path is configured.
#[derive(Debug, Default)]
pub struct MemoryPlayerRepo {
    records: DashMap<String, PlayerState>,
}

impl MemoryPlayerRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl PlayerRepo for MemoryPlayerRepo {
    async fn load(&self, player_id: &str) -> Result<Option<PlayerState>, StoreError> {
        Ok(self.records.get(player_id).map(|record| record.clone()))
    }

    async fn save(&self, state: &PlayerState) -> Result<(), StoreError> {
        self.records
            .insert(state.player_id.clone(), state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echoes_domain::{Quest, QuestStatus};

    #[tokio::test]
    async fn save_then_load_round_trips_all_fields() {
        let repo = MemoryPlayerRepo::new();
        let mut state = PlayerState::new("test_player");
        state.current_location = "north_chamber".to_string();
        state.add_item("torch");
        state.progress = Some("Heading north.".to_string());
        state.quests.insert(
            "defeat_guard".to_string(),
            Quest {
                status: QuestStatus::Completed,
                description: "Defeated the guard in the north chamber.".to_string(),
            },
        );

        repo.save(&state).await.expect("save");
        let loaded = repo.load("test_player").await.expect("load");
        assert_eq!(loaded, Some(state));
    }

    #[tokio::test]
    async fn load_of_unknown_player_returns_none() {
        let repo = MemoryPlayerRepo::new();
        assert_eq!(repo.load("nobody").await.expect("load"), None);
    }

    #[tokio::test]
    async fn save_overwrites_the_whole_record() {
        let repo = MemoryPlayerRepo::new();
        let mut first = PlayerState::new("test_player");
        first.add_item("torch");
        first.progress = Some("Old progress.".to_string());
        repo.save(&first).await.expect("save");

        let second = PlayerState::new("test_player");
        repo.save(&second).await.expect("save");

        let loaded = repo.load("test_player").await.expect("load");
        assert_eq!(loaded, Some(second));
    }
}
