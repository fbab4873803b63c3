//! # Query Builder System
//!
//! Parameterized SQL generation for the filtered-responses listing.
//!
//! ## Overview
//!
//! Every compiler in this module returns a [`SqlFragment`]: template text
//! with `?` placeholders plus the values bound to them, in placeholder
//! order. Fragments compose by concatenation, so the final query's
//! parameter list is always the concatenation of its parts' lists. Only
//! table, column and operator names from [`crate::constants`] are
//! interpolated into the text.
//!
//! ## Key Components
//!
//! - [`builder`] - SELECT builder emitting clauses in SQL order
//! - [`conditions`] - WHERE conditions combined with AND / OR
//! - [`filter`] - Client answer filters and their type-dispatching CASE expression
//! - [`having`] - Per-candidate count matching for the filtered scan
//! - [`joins`] - JOIN clause management
//! - [`metadata`] - Pagination, sort, status, date bounds, edit-link flag
//! - [`pagination`] - `LIMIT offset,limit` with lenient number parsing
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use form_responses::query_builder::{Filter, FilterCondition, FilterSet, QueryBuilder};
//!
//! let filters = FilterSet::new(vec![Filter::new("q1", FilterCondition::Equals, "red")]);
//! let query = QueryBuilder::new("submission")
//!     .inner_join("answer", "answer.submission_id = submission.submission_id")
//!     .where_fragment(filters.compile("answer.value", "answer.question_id"))
//!     .build();
//! assert_eq!(query.placeholder_count(), query.params.len());
//! ```

pub mod builder;
pub mod conditions;
pub mod filter;
pub mod fragment;
pub mod having;
pub mod joins;
pub mod metadata;
pub mod pagination;

pub use builder::QueryBuilder;
pub use conditions::{Condition, LogicalOperator, WhereClause};
pub use filter::{Filter, FilterCondition, FilterSet, FilterValue, NUMBER_PATTERN};
pub use fragment::{SqlFragment, SqlParam};
pub use having::{compile_having, CandidateCount};
pub use joins::Join;
pub use metadata::{QueryMetadata, RawParam, SortDirection};
pub use pagination::Pagination;
