//! Module for core business logic services.
//!
//! `retrieval` holds the pure selection functions, `random` the injectable
//! randomness they draw from, and `trivia` the service that ties both to the
//! question store.

pub mod random;
pub mod retrieval;
pub mod trivia;
