//! Dialogue event and action shapes for the fulfillment endpoint.
//!
//! The resolver service posts a `DialogueEvent` per recognized intent and
//! expects a `DialogueResponse` back: either a fulfilled close or a request
//! to elicit a missing slot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Slot name -> value as sent on the wire. Slots the resolver recognized but
/// could not fill arrive as explicit nulls.
pub type WireSlots = BTreeMap<String, Option<String>>;

/// One intent invocation, as delivered by the resolver service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueEvent {
    pub current_intent: CurrentIntent,
    #[serde(default)]
    pub session_attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentIntent {
    pub name: String,
    #[serde(default)]
    pub slots: WireSlots,
}

/// Top-level fulfillment reply envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueResponse {
    #[serde(rename = "dialogAction")]
    pub dialog_action: DialogueAction,
}

impl From<DialogueAction> for DialogueResponse {
    fn from(dialog_action: DialogueAction) -> Self {
        Self { dialog_action }
    }
}

/// What the dialogue should do next: close the turn, or ask for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DialogueAction {
    Close {
        #[serde(rename = "fulfillmentState")]
        fulfillment_state: FulfillmentState,
        message: DialogueMessage,
    },
    ElicitSlot {
        #[serde(rename = "intentName")]
        intent_name: String,
        slots: WireSlots,
        #[serde(rename = "slotToElicit")]
        slot_to_elicit: String,
        message: DialogueMessage,
    },
}

impl DialogueAction {
    /// A fulfilled close carrying plain text.
    pub fn fulfilled(content: impl Into<String>) -> Self {
        Self::Close {
            fulfillment_state: FulfillmentState::Fulfilled,
            message: DialogueMessage::plain(content),
        }
    }

    /// Ask the resolver to collect a missing slot before retrying the intent.
    pub fn elicit_slot(
        intent_name: impl Into<String>,
        slots: WireSlots,
        slot_to_elicit: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self::ElicitSlot {
            intent_name: intent_name.into(),
            slots,
            slot_to_elicit: slot_to_elicit.into(),
            message: DialogueMessage::plain(prompt),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FulfillmentState {
    Fulfilled,
    Failed,
}

/// Text shown to the player for this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueMessage {
    #[serde(rename = "contentType")]
    pub content_type: ContentType,
    pub content: String,
}

impl DialogueMessage {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::PlainText,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    PlainText,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_deserializes_from_the_resolver_shape() {
        let event: DialogueEvent = serde_json::from_value(json!({
            "currentIntent": {
                "name": "TakeIntent",
                "slots": { "Item": "torch" }
            },
            "sessionAttributes": { "player_id": "test_player" }
        }))
        .expect("deserialize");

        assert_eq!(event.current_intent.name, "TakeIntent");
        assert_eq!(
            event.current_intent.slots.get("Item"),
            Some(&Some("torch".to_string()))
        );
        assert_eq!(
            event.session_attributes.get("player_id"),
            Some(&"test_player".to_string())
        );
    }

    #[test]
    fn event_tolerates_missing_slots_and_session_attributes() {
        let event: DialogueEvent = serde_json::from_value(json!({
            "currentIntent": { "name": "GreetIntent" }
        }))
        .expect("deserialize");

        assert!(event.current_intent.slots.is_empty());
        assert!(event.session_attributes.is_empty());
    }

    #[test]
    fn null_slots_arrive_as_unfilled() {
        let event: DialogueEvent = serde_json::from_value(json!({
            "currentIntent": {
                "name": "TakeIntent",
                "slots": { "Item": null }
            }
        }))
        .expect("deserialize");

        assert_eq!(event.current_intent.slots.get("Item"), Some(&None));
    }

    #[test]
    fn close_action_serializes_with_exact_field_names() {
        let response = DialogueResponse::from(DialogueAction::fulfilled("Greetings, traveler."));
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            value,
            json!({
                "dialogAction": {
                    "type": "Close",
                    "fulfillmentState": "Fulfilled",
                    "message": {
                        "contentType": "PlainText",
                        "content": "Greetings, traveler."
                    }
                }
            })
        );
    }

    #[test]
    fn elicit_slot_action_serializes_with_exact_field_names() {
        let mut slots = WireSlots::new();
        slots.insert("Item".to_string(), None);
        let response = DialogueResponse::from(DialogueAction::elicit_slot(
            "TakeIntent",
            slots,
            "Item",
            "What do you want to take?",
        ));
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            value,
            json!({
                "dialogAction": {
                    "type": "ElicitSlot",
                    "intentName": "TakeIntent",
                    "slots": { "Item": null },
                    "slotToElicit": "Item",
                    "message": {
                        "contentType": "PlainText",
                        "content": "What do you want to take?"
                    }
                }
            })
        );
    }
}
