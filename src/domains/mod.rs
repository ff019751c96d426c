//! Domains module containing business logic organized by bounded contexts.
//!
//! - **support**: customer and ticket records in SQLite
//! - **tools**: the named operations exposed to clients over those records

pub mod support;
pub mod tools;
