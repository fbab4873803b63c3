//! # Database Operations
//!
//! MySQL access for the form-responses service.
//!
//! ## Key Components
//!
//! - [`connection`] - Pool construction and health checks
//! - [`store`] - The [`ResponseStore`] seam read by the listing orchestrator
//! - [`schema`] - Table DDL
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use form_responses::config::AppConfig;
//! use form_responses::database::{health_check, DatabaseConnection};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DatabaseConnection::new_lazy(&AppConfig::default().database).into_pool();
//! assert!(health_check(&pool).await?);
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod schema;
pub mod store;

pub use connection::{health_check, DatabaseConnection};
pub use schema::create_schema;
pub use store::{execute_fragment, ResponseStore};
