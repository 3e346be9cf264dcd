//! Echoes Player - interactive command-line client.
//!
//! Reads player commands from stdin, keeps the local world and player state,
//! and forwards anything conversational to the intent resolver service.

pub mod infrastructure;
pub mod ports;
pub mod session;

pub use session::{GameSession, Turn};
