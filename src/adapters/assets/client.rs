//! Asset store HTTP client
//!
//! Uploads image files to the external asset store over multipart HTTP.
//! The store is addressed and authenticated through [`AssetsConfig`]; the
//! per-upload deadline is enforced by the client's request timeout.

use crate::adapters::assets::models::UploadResponse;
use crate::adapters::assets::traits::{AssetUploader, UploadRequest};
use crate::config::AssetsConfig;
use crate::domain::{AssetApiError, PicsyncError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// HTTP client for the asset store upload API
pub struct AssetsClient {
    /// Upload endpoint, resolved once at construction
    upload_url: String,

    /// HTTP client with the configured deadline
    client: Client,

    /// Configuration, holds the API key
    config: AssetsConfig,
}

impl AssetsClient {
    /// Create a new asset store client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: AssetsConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            PicsyncError::Configuration(format!(
                "Invalid asset store base URL '{}': {}",
                config.base_url, e
            ))
        })?;

        let upload_url = format!("{}/assets/upload", base.as_str().trim_end_matches('/'));

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| PicsyncError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            upload_url,
            client,
            config,
        })
    }

    /// Upload endpoint this client posts to
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    fn build_form(request: UploadRequest) -> std::result::Result<Form, AssetApiError> {
        let part = Part::bytes(request.bytes)
            .file_name(request.file_name)
            .mime_str(&request.content_type)
            .map_err(|e| AssetApiError::InvalidRequest(e.to_string()))?;

        Ok(Form::new()
            .part("file", part)
            .text("entityType", "PRODUCT")
            .text("entityId", request.product_id.to_string())
            .text(
                "tags",
                format!(
                    "{},product-{}",
                    request.slot.local_field(),
                    request.product_id
                ),
            )
            .text("description", request.description)
            .text("altText", request.alt_text))
    }
}

#[async_trait]
impl AssetUploader for AssetsClient {
    async fn upload_image(&self, request: UploadRequest) -> std::result::Result<String, AssetApiError> {
        let product_id = request.product_id;
        let slot = request.slot;
        let form = Self::build_form(request)?;

        let response = self
            .client
            .post(&self.upload_url)
            .header("x-api-key", self.config.api_key.expose_secret().as_ref())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssetApiError::Timeout(e.to_string())
                } else {
                    AssetApiError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AssetApiError::InvalidResponse(e.to_string()))?;

        let parsed: Option<UploadResponse> = serde_json::from_str(&body).ok();

        // The store signals rejection with a message field, carried verbatim.
        if let Some(messages) = parsed.as_ref().and_then(|r| r.message.as_ref()) {
            tracing::warn!(
                product_id,
                slot = %slot,
                status = status.as_u16(),
                "Asset store rejected upload"
            );
            return Err(AssetApiError::Upload(messages.joined()));
        }

        if !status.is_success() {
            let message = if body.is_empty() {
                status_line(status)
            } else {
                format!("{}: {}", status_line(status), body)
            };
            return Err(AssetApiError::Upload(message));
        }

        let parsed = parsed.ok_or_else(|| {
            AssetApiError::InvalidResponse(format!("Unparseable upload response: {body}"))
        })?;

        let locator = parsed
            .urls
            .as_ref()
            .and_then(|urls| urls.locator())
            .ok_or(AssetApiError::NoLocatorReturned)?;

        tracing::debug!(product_id, slot = %slot, url = locator, "Uploaded image");
        Ok(locator.to_string())
    }
}

fn status_line(status: StatusCode) -> String {
    format!("upload failed with status {status}")
}
