//! The canonical durable player record.
//!
//! Both persistence call sites (the interactive loop's quit-save and the
//! fulfillment machine's SaveProgress/LoadProgress) read and write this one
//! schema, keyed by `player_id`. Saves are full overwrites, never merges.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::STARTING_LOCATION;

/// Everything persisted for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub player_id: String,
    pub current_location: String,
    /// Item ids in acquisition order. Duplicates are disallowed; every item
    /// here originated in some location's item set.
    #[serde(default)]
    pub inventory: Vec<String>,
    /// Free-text narrative summary of how far the player has come.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    #[serde(default)]
    pub quests: BTreeMap<String, Quest>,
}

impl PlayerState {
    /// A fresh game: starting chamber, nothing carried.
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            current_location: STARTING_LOCATION.to_string(),
            inventory: Vec::new(),
            progress: None,
            quests: BTreeMap::new(),
        }
    }

    /// Append an item, keeping the inventory duplicate-free.
    /// Returns whether the item was newly added.
    pub fn add_item(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.inventory.iter().any(|held| *held == item) {
            return false;
        }
        self.inventory.push(item);
        true
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|held| held == item)
    }
}

/// One quest line and where the player stands on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub status: QuestStatus,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestStatus {
    #[serde(rename = "not-started")]
    NotStarted,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not-started"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}
