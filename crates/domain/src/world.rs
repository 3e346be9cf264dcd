//! Static world model: locations, exits, and item placement.
//!
//! The location table is built once at process start and never grows or
//! shrinks; the only mutation is items leaving a location when taken.
//! Lookups never fail - unknown ids get a fixed description and empty
//! exit/item views, so a malformed exit target degrades gracefully instead
//! of panicking.

use std::collections::{BTreeMap, BTreeSet};

/// Description returned for any location id not in the table.
pub const UNKNOWN_LOCATION_DESCRIPTION: &str = "You are in an unknown location.";

static EMPTY_EXITS: BTreeMap<String, String> = BTreeMap::new();
static EMPTY_ITEMS: BTreeSet<String> = BTreeSet::new();

/// A place the player can stand in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: String,
    pub description: String,
    /// Direction keyword -> destination location id.
    pub exits: BTreeMap<String, String>,
    /// Items currently lying here. Items are removed when taken.
    pub items: BTreeSet<String>,
}

impl Location {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            exits: BTreeMap::new(),
            items: BTreeSet::new(),
        }
    }

    pub fn with_exit(mut self, direction: impl Into<String>, target: impl Into<String>) -> Self {
        self.exits.insert(direction.into(), target.into());
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.items.insert(item.into());
        self
    }
}

/// The static location table plus its per-process item placement.
#[derive(Debug, Clone)]
pub struct WorldModel {
    locations: BTreeMap<String, Location>,
}

impl WorldModel {
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Self {
        Self {
            locations: locations
                .into_iter()
                .map(|loc| (loc.id.clone(), loc))
                .collect(),
        }
    }

    /// Description of a location, or the fixed unknown-location text.
    pub fn describe(&self, location_id: &str) -> &str {
        self.locations
            .get(location_id)
            .map(|loc| loc.description.as_str())
            .unwrap_or(UNKNOWN_LOCATION_DESCRIPTION)
    }

    /// Exits of a location. Empty for unknown ids.
    pub fn exits_of(&self, location_id: &str) -> &BTreeMap<String, String> {
        self.locations
            .get(location_id)
            .map(|loc| &loc.exits)
            .unwrap_or(&EMPTY_EXITS)
    }

    /// Items currently at a location. Empty for unknown ids.
    pub fn items_at(&self, location_id: &str) -> &BTreeSet<String> {
        self.locations
            .get(location_id)
            .map(|loc| &loc.items)
            .unwrap_or(&EMPTY_ITEMS)
    }

    /// Remove an item from a location. Returns whether the item was there;
    /// an absent item or unknown location mutates nothing.
    pub fn take_item(&mut self, location_id: &str, item: &str) -> bool {
        self.locations
            .get_mut(location_id)
            .map(|loc| loc.items.remove(item))
            .unwrap_or(false)
    }

    /// Remove an item from whichever location currently holds it.
    ///
    /// Used when restoring a saved game: the location table is rebuilt fresh
    /// each process start, so items already in the player's inventory must
    /// leave the world again to keep ownership exclusive.
    pub fn claim_item(&mut self, item: &str) -> bool {
        for loc in self.locations.values_mut() {
            if loc.items.remove(item) {
                return true;
            }
        }
        false
    }

    pub fn contains(&self, location_id: &str) -> bool {
        self.locations.contains_key(location_id)
    }
}

impl Default for WorldModel {
    /// The shipped game world: two chambers joined north/south.
    fn default() -> Self {
        Self::new([
            Location::new("starting_chamber", "You are in a dimly lit chamber.")
                .with_exit("north", "north_chamber")
                .with_item("torch"),
            Location::new("north_chamber", "You are in a cold, stone chamber.")
                .with_exit("south", "starting_chamber")
                .with_item("key"),
        ])
    }
}
