//! Core library of the blog publisher.
//!
//! With the `data` feature the crate exposes the domain model, the Diesel
//! persistence layer, input validation and the service operations over
//! categories and posts. The `server` feature adds the two Actix-web
//! surfaces built on them: the HTML admin (`blog-admin`) and the JSON API
//! (`blog-api`).

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;

#[cfg(feature = "server")]
pub mod csrf;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod routes;
