//! Trivia backend: an axum HTTP API over a question store.
//!
//! The binary in `main.rs` wires configuration, logging and the store together;
//! everything else lives here so integration tests can build the same router.

pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod utils;

pub use api::build_router;
pub use services::trivia::TriviaService;
