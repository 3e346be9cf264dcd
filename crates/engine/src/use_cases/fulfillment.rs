//! Dialogue fulfillment state machine.
//!
//! One-shot per event: the resolver service has already recognized an intent
//! and delivers it with its slots and session attributes. This machine is
//! stateless between invocations - everything it needs comes from the event
//! plus a store read, so concurrent events for different players are safe.
//! Concurrent events for the *same* player race on the store's
//! last-write-wins semantics; no versioning is attempted.
//!
//! Per-intent policy is deterministic. Only SaveProgress and LoadProgress
//! touch the store; only Look touches the story generator; Take and Movement
//! are confirmation-only and deliberately mutate nothing (the interactive
//! loop is where world state actually moves).

use std::collections::BTreeMap;
use std::sync::Arc;

use echoes_domain::intent::{
    DIRECTION_SLOT, ITEM_SLOT, LOCATION_SLOT, LOOKED_AT_OBJECT_SLOT, PROGRESS_SLOT,
};
use echoes_domain::{
    Intent, PlayerState, Quest, WorldModel, DEFAULT_PLAYER_ID, PLAYER_ID_ATTRIBUTE,
    STARTING_LOCATION,
};
use echoes_protocol::{DialogueAction, DialogueEvent};
use echoes_store::PlayerRepo;

use crate::infrastructure::ports::{StoryPort, STORY_FAULT_TEXT};

/// Token budget for object descriptions.
const STORY_MAX_TOKENS: u32 = 500;

const GREETING_TEXT: &str = "Greetings, traveler.";
const UNKNOWN_INTENT_TEXT: &str = "I don't understand that.";
const SAVE_CONFIRM_TEXT: &str = "Your progress has been saved.";
const SAVE_FAILED_TEXT: &str = "Your progress could not be saved.";
const NO_SAVED_PROGRESS_TEXT: &str = "No saved progress found.";
// Placeholder: the voice-bot inventory reply is not derived from the real
// record. Kept as-is; see DESIGN.md.
const INVENTORY_PLACEHOLDER_TEXT: &str = "You have a torch and a key.";

/// The dialogue fulfillment use case.
pub struct Fulfillment {
    world: WorldModel,
    store: Arc<dyn PlayerRepo>,
    story: Arc<dyn StoryPort>,
}

impl Fulfillment {
    pub fn new(world: WorldModel, store: Arc<dyn PlayerRepo>, story: Arc<dyn StoryPort>) -> Self {
        Self {
            world,
            store,
            story,
        }
    }

    /// Handle one dialogue event. Never fails: faults from collaborators are
    /// logged and degraded to fixed player-facing text.
    pub async fn handle(&self, event: &DialogueEvent) -> DialogueAction {
        let player_id = event
            .session_attributes
            .get(PLAYER_ID_ATTRIBUTE)
            .cloned()
            .unwrap_or_else(|| DEFAULT_PLAYER_ID.to_string());
        let intent = Intent::from_wire(&event.current_intent.name, &event.current_intent.slots);
        tracing::debug!(player_id = %player_id, intent = ?intent, "handling dialogue event");

        match intent {
            Intent::Greet => DialogueAction::fulfilled(GREETING_TEXT),

            Intent::AskAboutLocation {
                location: Some(location),
            } => DialogueAction::fulfilled(self.world.describe(&location)),
            Intent::AskAboutLocation { location: None } => elicit(
                event,
                LOCATION_SLOT,
                "Which location are you interested in?",
            ),

            Intent::Take { item: Some(item) } => {
                DialogueAction::fulfilled(format!("You take the {item}."))
            }
            Intent::Take { item: None } => elicit(event, ITEM_SLOT, "What do you want to take?"),

            Intent::Look {
                object: Some(object),
            } => self.describe_object(&object).await,
            Intent::Look { object: None } => elicit(
                event,
                LOOKED_AT_OBJECT_SLOT,
                "What do you want to look at?",
            ),

            Intent::SaveProgress {
                progress: Some(progress),
                inventory,
                current_location,
                quests,
            } => {
                self.save_progress(&player_id, progress, inventory, current_location, quests)
                    .await
            }
            Intent::SaveProgress { progress: None, .. } => elicit(
                event,
                PROGRESS_SLOT,
                "What progress would you like to save?",
            ),

            Intent::LoadProgress => self.load_progress(&player_id).await,

            Intent::Inventory => DialogueAction::fulfilled(format!(
                "Your inventory contains: {INVENTORY_PLACEHOLDER_TEXT}"
            )),

            Intent::Movement {
                direction: Some(direction),
            } => DialogueAction::fulfilled(format!("You move {direction}.")),
            Intent::Movement { direction: None } => elicit(
                event,
                DIRECTION_SLOT,
                "Which direction would you like to move?",
            ),

            Intent::Unknown { name } => {
                tracing::debug!(intent_name = %name, "unrecognized intent");
                DialogueAction::fulfilled(UNKNOWN_INTENT_TEXT)
            }
        }
    }

    async fn describe_object(&self, object: &str) -> DialogueAction {
        let prompt = format!("Describe the {object}.");
        match self.story.generate(&prompt, STORY_MAX_TOKENS).await {
            Ok(text) => DialogueAction::fulfilled(text),
            Err(e) => {
                tracing::error!(error = %e, object = %object, "story generation failed");
                DialogueAction::fulfilled(STORY_FAULT_TEXT)
            }
        }
    }

    /// Replace the player's whole record from the SaveProgress slots.
    async fn save_progress(
        &self,
        player_id: &str,
        progress: String,
        inventory: Option<String>,
        current_location: Option<String>,
        quests: Option<String>,
    ) -> DialogueAction {
        let mut state = PlayerState::new(player_id);
        state.current_location =
            current_location.unwrap_or_else(|| STARTING_LOCATION.to_string());
        state.progress = Some(progress);
        for item in parse_inventory_slot(inventory.as_deref()) {
            state.add_item(item);
        }
        state.quests = parse_quests_slot(quests.as_deref());

        match self.store.save(&state).await {
            Ok(()) => DialogueAction::fulfilled(SAVE_CONFIRM_TEXT),
            Err(e) => {
                tracing::error!(error = %e, player_id = %player_id, "saving progress failed");
                DialogueAction::fulfilled(SAVE_FAILED_TEXT)
            }
        }
    }

    async fn load_progress(&self, player_id: &str) -> DialogueAction {
        let progress = match self.store.load(player_id).await {
            Ok(record) => record.and_then(|state| state.progress),
            Err(e) => {
                tracing::error!(error = %e, player_id = %player_id, "loading progress failed");
                None
            }
        };
        let progress = progress.unwrap_or_else(|| NO_SAVED_PROGRESS_TEXT.to_string());
        DialogueAction::fulfilled(format!("Your saved progress is: {progress}"))
    }
}

fn elicit(event: &DialogueEvent, slot: &str, prompt: &str) -> DialogueAction {
    DialogueAction::elicit_slot(
        event.current_intent.name.clone(),
        event.current_intent.slots.clone(),
        slot,
        prompt,
    )
}

/// The Inventory slot arrives as one string; treat it as a comma-separated
/// item list.
fn parse_inventory_slot(slot: Option<&str>) -> Vec<String> {
    slot.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// The Quests slot arrives as a JSON object; an unparseable value is logged
/// and dropped rather than failing the save.
fn parse_quests_slot(slot: Option<&str>) -> BTreeMap<String, Quest> {
    let Some(value) = slot else {
        return BTreeMap::new();
    };
    match serde_json::from_str(value) {
        Ok(quests) => quests,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unparseable Quests slot");
            BTreeMap::new()
        }
    }
}
