//! Query builder tests: filter semantics and the compiled listing queries

pub mod listing_queries;
