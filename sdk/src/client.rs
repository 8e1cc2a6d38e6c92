//! HTTP client for the PocketBase collections API.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::error::PbtsError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Collections requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Auth collection holding superuser accounts.
pub const SUPERUSERS_COLLECTION: &str = "_superusers";

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionPage {
    page:        u32,
    total_pages: i64,
    items:       Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone)]
pub struct PocketBaseClient {
    base_url:  String,
    http:      reqwest::Client,
    token:     Option<String>,
    page_size: u32,
}

impl PocketBaseClient {
    pub fn new(url: &str) -> Result<Self, PbtsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(PocketBaseClient {
            base_url: url.trim_end_matches('/').to_string(),
            http,
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Signs in as a superuser and keeps the token for later requests.
    pub async fn authenticate_superuser(&mut self, email: &str, password: &str) -> Result<(), PbtsError> {
        let url = format!(
            "{}/api/collections/{}/auth-with-password",
            self.base_url, SUPERUSERS_COLLECTION
        );
        debug!("Authenticating against {}", url);

        let response = self
            .http
            .post(&url)
            .json(&json!({ "identity": email, "password": password }))
            .send()
            .await?;
        let auth: AuthResponse = check(response).await?.json().await?;

        self.token = Some(auth.token);
        Ok(())
    }

    /// Fetches every collection, following pagination until the last page.
    ///
    /// Records are returned untouched so that they can be written out in
    /// the exact shape the service produced.
    pub async fn list_collections(&self) -> Result<Vec<Value>, PbtsError> {
        let url = format!("{}/api/collections", self.base_url);
        let mut collections = Vec::new();
        let mut page = 1u32;

        loop {
            let mut request = self
                .http
                .get(format!("{}?page={}&perPage={}", url, page, self.page_size));
            if let Some(token) = &self.token {
                request = request.header(reqwest::header::AUTHORIZATION, token);
            }

            let body: CollectionPage = check(request.send().await?).await?.json().await?;
            debug!(
                "Fetched collections page {}/{} ({} items)",
                body.page,
                body.total_pages,
                body.items.len()
            );

            // Compare the requested page, not the one echoed back.
            let done = body.items.is_empty() || i64::from(page) >= body.total_pages;
            collections.extend(body.items);
            if done {
                break;
            }
            page += 1;
        }

        Ok(collections)
    }
}

/// Turns a non-success response into [`PbtsError::Api`], using the
/// service's `message` when the body carries one.
async fn check(response: Response) -> Result<Response, PbtsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .ok()
        .map(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| default_message(status, &text));

    Err(PbtsError::Api {
        status: status.as_u16(),
        message,
    })
}

fn default_message(status: StatusCode, text: &str) -> String {
    if text.trim().is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        text.trim().to_string()
    }
}
