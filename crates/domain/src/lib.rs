//! Echoes Domain - core game types.
//!
//! Pure data types and world-model logic shared by the engine (server-side
//! dialogue fulfillment) and the player (interactive loop):
//!
//! - `world` - static locations, exits, and item placement
//! - `player_state` - the canonical durable player record
//! - `intent` - recognized intents and their slots
//!
//! No I/O lives here; external services are reached through ports defined
//! where they are used.

pub mod intent;
pub mod player_state;
pub mod world;

pub use intent::Intent;
pub use player_state::{PlayerState, Quest, QuestStatus};
pub use world::{Location, WorldModel};

use std::collections::BTreeMap;

/// Ephemeral per-session key/value context. Carries `player_id` plus any
/// resolver-assigned state, and is never persisted.
pub type SessionAttributes = BTreeMap<String, String>;

/// Session attribute naming the player a conversation belongs to.
pub const PLAYER_ID_ATTRIBUTE: &str = "player_id";

/// Player id used when a session carries none.
pub const DEFAULT_PLAYER_ID: &str = "test_player";

/// Location new games (and saves with no location) start in.
pub const STARTING_LOCATION: &str = "starting_chamber";
