//! Use cases - one per inbound operation.

pub mod fulfillment;

pub use fulfillment::Fulfillment;
