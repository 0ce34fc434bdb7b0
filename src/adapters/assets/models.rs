//! Asset store API response models

use serde::Deserialize;

/// Response body of the upload endpoint
///
/// A successful upload carries `urls`; a rejected one carries `message` with
/// one or more error strings. Both are optional so either shape deserializes.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    /// URLs of the stored asset variants
    pub urls: Option<UploadUrls>,

    /// Error message(s) reported by the store
    pub message: Option<ApiMessages>,
}

/// URL fields returned for a stored asset
#[derive(Debug, Deserialize)]
pub struct UploadUrls {
    /// URL of the original upload
    pub original: Option<String>,

    /// URL of the generated preview
    pub preview: Option<String>,
}

impl UploadUrls {
    /// The locator the pipeline records: original preferred, preview fallback
    pub fn locator(&self) -> Option<&str> {
        self.original
            .as_deref()
            .filter(|url| !url.is_empty())
            .or(self.preview.as_deref().filter(|url| !url.is_empty()))
    }
}

/// The store reports errors as either a single string or a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiMessages {
    One(String),
    Many(Vec<String>),
}

impl ApiMessages {
    /// Join all messages into one string, verbatim
    pub fn joined(&self) -> String {
        match self {
            ApiMessages::One(message) => message.clone(),
            ApiMessages::Many(messages) => messages.join(", "),
        }
    }
}
