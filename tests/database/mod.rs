//! Tests against a live MySQL server (`DATABASE_URL`)

pub mod listing;
