//! Echoes Engine library.
//!
//! Server-side half of the game: the dialogue fulfillment state machine and
//! the HTTP entry point the intent resolver calls back into.
//!
//! ## Structure
//!
//! - `infrastructure/` - external dependency ports + adapters (story service)
//! - `use_cases/` - the fulfillment state machine
//! - `api/` - HTTP entry point
//! - `app` - application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
