//! Live adapter for the remove.bg API.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::config::API_KEY_ENV;
use crate::error::RemoveBgError;
use crate::ports::background_remover::{
    BackgroundRemover, RemovalRequest, RemoveFuture, RemovedImage,
};

const REMOVEBG_API_URL: &str = "https://api.remove.bg/v1.0/removebg";

/// Live remover that uploads images to remove.bg.
///
/// Intentionally not `Debug`: the struct holds the API key.
pub struct RemoveBgClient {
    client: Client,
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl RemoveBgClient {
    /// Create a client with the given API key and client-side timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RemoveBgError::MissingApiKey`] for a blank key, or a
    /// network error if the HTTP client cannot be built.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, RemoveBgError> {
        if api_key.trim().is_empty() {
            return Err(RemoveBgError::MissingApiKey { env_var: API_KEY_ENV.into() });
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key, endpoint: REMOVEBG_API_URL.to_string(), timeout })
    }

    /// Point the client at a different endpoint.
    #[cfg(test)]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn classify(&self, err: reqwest::Error) -> RemoveBgError {
        if err.is_timeout() {
            RemoveBgError::Timeout { timeout: self.timeout }
        } else {
            RemoveBgError::Network(err)
        }
    }
}

impl BackgroundRemover for RemoveBgClient {
    fn remove(&self, request: &RemovalRequest) -> RemoveFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let upload_len = request.image.len();
            let part = Part::bytes(request.image)
                .file_name(request.file_name)
                .mime_str(&request.mime_type)
                .map_err(RemoveBgError::Network)?;
            let form = Form::new().part("image_file", part).text("size", request.size);

            debug!(endpoint = %self.endpoint, bytes = upload_len, "uploading image");

            let response = self
                .client
                .post(&self.endpoint)
                .header("X-Api-Key", &self.api_key)
                .multipart(form)
                .send()
                .await
                .map_err(|e| self.classify(e))?;

            let status = response.status();
            info!(status = status.as_u16(), "remove.bg responded");

            if status != StatusCode::OK {
                let body = response.text().await.map_err(|e| self.classify(e))?;
                return Err(RemoveBgError::RemoteRejected { status: status.as_u16(), body });
            }

            let data = response.bytes().await.map_err(|e| self.classify(e))?;
            debug!(bytes = data.len(), "received processed image");

            Ok(RemovedImage { data: data.to_vec() })
        })
    }
}
