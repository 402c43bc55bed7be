//! Question listing, creation, deletion and search.

pub mod handlers;
pub mod routes;
