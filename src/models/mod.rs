//! Diesel row models and their conversions to domain entities.

pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod post;
