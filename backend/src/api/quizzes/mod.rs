//! Quiz play: one unseen question per request.

pub mod handlers;
pub mod routes;
