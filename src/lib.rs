#![allow(clippy::doc_markdown)] // Allow technical terms like MySQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Form Responses
//!
//! Proxies Fillout form submissions into MySQL and serves a filtered,
//! paginated listing over them.
//!
//! ## Overview
//!
//! Submissions, questions and answers are stored entity-attribute-value
//! style. A listing request carries a list of filters (`equals`,
//! `does_not_equal`, `greater_than`, `less_than`), each targeting one
//! question; a submission is returned only when it satisfies all of them.
//! Filters compile into parameterized SQL fragments whose placeholder order
//! always matches their parameter order.
//!
//! ## Module Organization
//!
//! - [`query_builder`] - Filter, metadata and HAVING compilers plus the SELECT builder
//! - [`services`] - Three-phase listing orchestrator and table population
//! - [`models`] - Submission, question and answer entities and response shapes
//! - [`database`] - Pool construction, the [`database::ResponseStore`] seam, DDL
//! - [`client`] - Upstream form source and its Fillout HTTP implementation
//! - [`web`] - Axum routes and handlers
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use form_responses::query_builder::QueryMetadata;
//! use form_responses::services::{FilterParams, FilteredResponsesQuery};
//! use sqlx::MySqlPool;
//!
//! # async fn example(pool: &MySqlPool) -> Result<(), Box<dyn std::error::Error>> {
//! let params = FilterParams {
//!     filters: Some(r#"[{"id":"q1","condition":"equals","value":"red"}]"#.to_string()),
//! };
//! let query = FilteredResponsesQuery::from_params(&params, QueryMetadata::default());
//!
//! let mut conn = pool.acquire().await?;
//! let submissions = query.execute(&mut *conn).await?;
//! println!("{} matching submissions", submissions.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test                                # Unit and router tests
//! cargo test --features mysql-integration   # Adds tests against DATABASE_URL
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod query_builder;
pub mod services;
pub mod utils;
pub mod web;

pub use config::AppConfig;
pub use error::{FormResponsesError, Result};
