//! External dependency implementations (ports + adapters).

pub mod ports;
pub mod story;
