//! Category listing and per-category question lookup.

pub mod handlers;
pub mod routes;
