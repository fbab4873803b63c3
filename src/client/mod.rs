//! # Upstream Form Source
//!
//! Ingestion reads submissions from the hosted form service through the
//! [`FormSource`] seam; [`FilloutClient`] is the HTTP implementation.

pub mod fillout;

use crate::error::Result;
use crate::models::{Submission, SubmissionStatus};
use async_trait::async_trait;

pub use fillout::{FilloutClient, PAGE_SIZE};

/// Source of submissions to ingest
#[async_trait]
pub trait FormSource: Send + Sync {
    /// Every submission with the given status, questions and answers attached
    async fn fetch_submissions(&self, status: SubmissionStatus) -> Result<Vec<Submission>>;
}
