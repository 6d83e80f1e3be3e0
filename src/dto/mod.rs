//! JSON bodies of the REST API.
//!
//! Field names are camelCase on the wire. Every request field is optional at
//! the serde level so that missing values surface as validation messages
//! rather than as deserialization failures.

pub mod categories;
pub mod posts;
