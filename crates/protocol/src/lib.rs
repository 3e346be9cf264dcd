//! Echoes Protocol - wire types shared across service boundaries.
//!
//! This crate contains the exact JSON shapes exchanged with the two external
//! services: the dialogue event/action pair the intent resolver posts to the
//! engine's fulfillment endpoint, and the request/reply pair the interactive
//! client exchanges with the resolver itself.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - serde only
//! 2. **No business logic** - pure data types and serialization
//! 3. **Field names are the contract** - renames match the external services
//!    exactly, including the casing quirks they ship with

pub mod dialogue;
pub mod resolver;

pub use dialogue::{
    CurrentIntent, DialogueAction, DialogueEvent, DialogueMessage, DialogueResponse,
    FulfillmentState,
};
pub use resolver::{ResolverReply, ResolverRequest};
