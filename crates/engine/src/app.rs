//! Application state and composition.

use std::sync::Arc;

use echoes_domain::WorldModel;
use echoes_store::PlayerRepo;

use crate::infrastructure::ports::StoryPort;
use crate::use_cases::Fulfillment;

/// Main application state, passed to HTTP handlers via Axum state.
///
/// Adapters are constructed once in `main` and injected here - there are no
/// module-level clients.
pub struct App {
    pub fulfillment: Fulfillment,
}

impl App {
    pub fn new(store: Arc<dyn PlayerRepo>, story: Arc<dyn StoryPort>) -> Self {
        Self {
            fulfillment: Fulfillment::new(WorldModel::default(), store, story),
        }
    }
}
