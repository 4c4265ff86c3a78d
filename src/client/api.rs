//! HTTP client for the libraries API

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::views::LibraryView;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server answered {status}: {message}")]
    Status { status: StatusCode, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Subset of the server error body the client cares about
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct LibrariesClient {
    http: Client,
    base_url: String,
}

impl LibrariesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn library_url(&self, id: i32) -> String {
        format!("{}/libraries/{}", self.base_url, id)
    }

    /// Fetch one rendered library
    pub async fn fetch_library(&self, id: i32) -> ClientResult<LibraryView> {
        let response = self.http.get(self.library_url(id)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(ClientError::Status { status, message });
        }

        Ok(response.json::<LibraryView>().await?)
    }
}
