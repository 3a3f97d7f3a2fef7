//! Blocking HTTP client for the catalog service
//!
//! Two endpoints: the category list (GET) and the application submission
//! (POST). Calls are blocking by design; the TUI runs them on worker threads
//! and collects results through its event channel.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::{WizardError, WizardResult};

use super::{CategoryOption, RawCategoryList};

/// Request body for the submission endpoint
#[derive(Debug, Clone, Serialize)]
struct SubmissionBody<'a> {
    title: &'a str,
}

/// What the submission endpoint returns on success
///
/// Only the echoed fields we care about; the service sends more.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Client for the remote catalog/submission service
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Build a client from settings
    pub fn new(settings: &Settings) -> WizardResult<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| WizardError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: settings.api_base_url.clone(),
        })
    }

    /// Fetch and normalize the category list
    pub fn fetch_categories(&self) -> WizardResult<Vec<CategoryOption>> {
        let url = format!("{}/products/categories", self.base_url);
        debug!(%url, "fetching categories");

        let response = self.http.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "category fetch failed");
            return Err(WizardError::Network(format!(
                "category endpoint answered {status}"
            )));
        }

        let raw: RawCategoryList = response
            .json()
            .map_err(|e| WizardError::Json(e.to_string()))?;
        let categories = raw.normalize();
        debug!(count = categories.len(), "categories loaded");
        Ok(categories)
    }

    /// Submit the application summary (`{"title": "<first> <last>"}`)
    ///
    /// A non-success status surfaces as [`WizardError::Http`] carrying the
    /// status code and the response text.
    pub fn submit_application(&self, title: &str) -> WizardResult<SubmissionReceipt> {
        let url = format!("{}/products/add", self.base_url);
        debug!(%url, title, "submitting application");

        let response = self.http.post(&url).json(&SubmissionBody { title }).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%status, "submission rejected");
            return Err(WizardError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let receipt = response
            .json()
            .map_err(|e| WizardError::Json(e.to_string()))?;
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_body_shape() {
        let body = serde_json::to_string(&SubmissionBody { title: "Ana Pop" }).unwrap();
        assert_eq!(body, r#"{"title":"Ana Pop"}"#);
    }

    #[test]
    fn test_receipt_tolerates_extra_fields() {
        let receipt: SubmissionReceipt =
            serde_json::from_str(r#"{"id":195,"title":"Ana Pop","price":0}"#).unwrap();
        assert_eq!(receipt.id, Some(195));
        assert_eq!(receipt.title.as_deref(), Some("Ana Pop"));
    }

    #[test]
    fn test_client_builds_with_defaults() {
        let client = CatalogClient::new(&Settings::default()).unwrap();
        assert_eq!(client.base_url, "https://dummyjson.com");
    }
}
