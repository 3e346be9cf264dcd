//! Request/reply shapes for the intent resolver service.
//!
//! The interactive client posts utterances here. The service owns the casing
//! of both shapes: snake_case on the request, `sessionAttributes` on the
//! reply. Replicated as-is - this is an external contract, not ours to tidy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverRequest {
    pub utterance: String,
    pub session_attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverReply {
    /// Text to show the player for this turn.
    pub message: String,
    /// Updated session context. Absent means keep what the client already
    /// has.
    #[serde(
        rename = "sessionAttributes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub session_attributes: Option<BTreeMap<String, String>>,
}
