//! Configuration and shared types
//!
//! Settings loading, result types and the error taxonomy.

pub mod settings;
pub mod types;
