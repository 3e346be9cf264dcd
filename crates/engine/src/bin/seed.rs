//! Seed a sample player record into the store.
//!
//! Writes the reference save (torch and key in hand, both quest lines in
//! play) through the real adapter and reads it back, exercising the full
//! record schema end to end.

use echoes_domain::{PlayerState, Quest, QuestStatus};
use echoes_store::{PlayerRepo, SqlitePlayerRepo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let store_db = std::env::var("STORE_DB").unwrap_or_else(|_| "player_data.db".into());
    let store = SqlitePlayerRepo::new(&store_db).await?;

    let mut state = PlayerState::new("test_player");
    state.progress =
        Some("You are in the starting chamber. You have taken the torch.".to_string());
    state.add_item("torch");
    state.add_item("key");
    state.quests.insert(
        "find_artifact".to_string(),
        Quest {
            status: QuestStatus::InProgress,
            description: "Find the ancient artifact in the hidden room.".to_string(),
        },
    );
    state.quests.insert(
        "defeat_guard".to_string(),
        Quest {
            status: QuestStatus::Completed,
            description: "Defeated the guard in the north chamber.".to_string(),
        },
    );

    store.save(&state).await?;
    tracing::info!(player_id = %state.player_id, db = %store_db, "seed record written");

    if let Some(stored) = store.load(&state.player_id).await? {
        println!("{}", serde_json::to_string_pretty(&stored)?);
    }

    Ok(())
}
