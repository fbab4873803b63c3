//! # Fillout API Client
//!
//! Reads form submissions from `GET {base_url}/forms/{form_id}/submissions`
//! with a bearer secret, following `offset` until `totalResponses` rows
//! have been read.

use super::FormSource;
use crate::config::FilloutConfig;
use crate::error::{FormResponsesError, Result};
use crate::models::{ApiSubmissionPage, Submission, SubmissionStatus};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Largest page the upstream API serves
pub const PAGE_SIZE: usize = 150;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct FilloutClient {
    client: Client,
    submissions_url: Url,
    secret: String,
}

impl std::fmt::Debug for FilloutClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilloutClient")
            .field("submissions_url", &self.submissions_url.as_str())
            .field("secret_configured", &!self.secret.is_empty())
            .finish()
    }
}

impl FilloutClient {
    pub fn new(config: &FilloutConfig) -> Result<Self> {
        let submissions_url = Url::parse(&format!(
            "{}/forms/{}/submissions",
            config.base_url.trim_end_matches('/'),
            config.form_id
        ))
        .map_err(|e| FormResponsesError::ConfigurationError(format!("Invalid base URL: {e}")))?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("form-responses/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            submissions_url,
            secret: config.secret.clone(),
        })
    }

    /// URL of one page; finished submissions are the upstream default and
    /// carry no `status` parameter
    pub fn page_url(&self, status: SubmissionStatus, offset: usize) -> Url {
        let mut url = self.submissions_url.clone();
        {
            let mut query_pairs = url.query_pairs_mut();
            query_pairs.append_pair("includeEditLink", "true");
            if status == SubmissionStatus::InProgress {
                query_pairs.append_pair("status", status.as_str());
            }
            query_pairs.append_pair("limit", &PAGE_SIZE.to_string());
            query_pairs.append_pair("offset", &offset.to_string());
        }
        url
    }

    async fn fetch_page(&self, status: SubmissionStatus, offset: usize) -> Result<ApiSubmissionPage> {
        let url = self.page_url(status, offset);
        debug!(url = %url, status = status.as_str(), "Fetching submissions page");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.secret)
            .send()
            .await?;

        if !response.status().is_success() {
            let code = response.status();
            warn!(status = %code, "Upstream submissions request failed");
            return Err(FormResponsesError::upstream(format!(
                "submissions request failed with status: {code}"
            )));
        }

        response.json::<ApiSubmissionPage>().await.map_err(|e| {
            FormResponsesError::upstream(format!("Failed to parse submissions response: {e}"))
        })
    }
}

#[async_trait]
impl FormSource for FilloutClient {
    async fn fetch_submissions(&self, status: SubmissionStatus) -> Result<Vec<Submission>> {
        let mut submissions = Vec::new();
        loop {
            let page = self.fetch_page(status, submissions.len()).await?;
            let fetched = page.responses.len();
            let total = page.total_responses.unwrap_or(0);

            submissions.extend(
                page.responses
                    .into_iter()
                    .map(|api| Submission::from_api(api, status)),
            );

            if fetched == 0 || submissions.len() as u64 >= total {
                break;
            }
        }

        info!(
            status = status.as_str(),
            count = submissions.len(),
            "Fetched upstream submissions"
        );
        Ok(submissions)
    }
}
