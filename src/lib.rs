//! Bilingual (English/Arabic) site content management.
//!
//! The `data` feature carries the content model, validation and the
//! repository contract with its SQLite store. `server` adds the JSON data
//! service, `client` the HTTP repository and the admin console controller.

#[cfg(feature = "client")]
pub mod console;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;
