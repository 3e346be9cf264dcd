//! Recognized intents and their slots.
//!
//! The resolver service hands the fulfillment machine an intent name plus a
//! slot map; `Intent::from_wire` turns that pair into a tagged value so slot
//! access is checked at compile time. An intent is consumed exactly once per
//! turn and never persisted. The interactive loop does not build `Intent`
//! values - its seven commands are dispatched locally before any resolver
//! call.

use std::collections::BTreeMap;

/// Slot name -> value. A slot the resolver recognized but could not fill is
/// present with a `None` value.
pub type SlotMap = BTreeMap<String, Option<String>>;

pub const LOCATION_SLOT: &str = "Location";
pub const ITEM_SLOT: &str = "Item";
pub const LOOKED_AT_OBJECT_SLOT: &str = "LookedAtObject";
pub const PROGRESS_SLOT: &str = "Progress";
pub const INVENTORY_SLOT: &str = "Inventory";
pub const CURRENT_LOCATION_SLOT: &str = "CurrentLocation";
pub const QUESTS_SLOT: &str = "Quests";
pub const DIRECTION_SLOT: &str = "Direction";

/// A structured player intent, as produced by the intent resolver.
///
/// Slot fields are `None` when the slot is missing, unfilled, or empty;
/// fulfillment elicits those before proceeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Greet,
    AskAboutLocation {
        location: Option<String>,
    },
    Take {
        item: Option<String>,
    },
    Look {
        object: Option<String>,
    },
    SaveProgress {
        progress: Option<String>,
        inventory: Option<String>,
        current_location: Option<String>,
        quests: Option<String>,
    },
    LoadProgress,
    Inventory,
    Movement {
        direction: Option<String>,
    },
    Unknown {
        name: String,
    },
}

impl Intent {
    /// Build an intent from the wire-level name and slot map.
    ///
    /// Unrecognized names map to `Unknown` rather than failing; the
    /// fulfillment machine answers those with a fixed reply.
    pub fn from_wire(name: &str, slots: &SlotMap) -> Self {
        match name {
            "GreetIntent" => Self::Greet,
            "AskAboutLocationIntent" => Self::AskAboutLocation {
                location: slot(slots, LOCATION_SLOT),
            },
            "TakeIntent" => Self::Take {
                item: slot(slots, ITEM_SLOT),
            },
            "LookIntent" => Self::Look {
                object: slot(slots, LOOKED_AT_OBJECT_SLOT),
            },
            "SaveProgressIntent" => Self::SaveProgress {
                progress: slot(slots, PROGRESS_SLOT),
                inventory: slot(slots, INVENTORY_SLOT),
                current_location: slot(slots, CURRENT_LOCATION_SLOT),
                quests: slot(slots, QUESTS_SLOT),
            },
            "LoadProgressIntent" => Self::LoadProgress,
            "InventoryIntent" => Self::Inventory,
            "MovementIntent" => Self::Movement {
                direction: slot(slots, DIRECTION_SLOT),
            },
            other => Self::Unknown {
                name: other.to_string(),
            },
        }
    }
}

/// A filled slot value; unfilled and empty-string slots count as absent.
fn slot(slots: &SlotMap, name: &str) -> Option<String> {
    slots
        .get(name)
        .and_then(|value| value.clone())
        .filter(|value| !value.is_empty())
}
