//! External dependency implementations.

pub mod resolver;
