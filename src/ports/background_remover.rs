//! Background remover port for remote segmentation services.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::RemoveBgError;

/// Output size requested from the service. Only `auto` is used.
pub const SIZE_AUTO: &str = "auto";

/// A single upload to the background removal service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovalRequest {
    /// Raw bytes of the input image. Never written to cassettes.
    #[serde(skip)]
    pub image: Vec<u8>,
    /// File name sent with the multipart part.
    pub file_name: String,
    /// MIME type of the input image.
    pub mime_type: String,
    /// Requested output size.
    pub size: String,
}

/// The processed image returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovedImage {
    /// Raw image bytes, exactly as received.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Boxed future type returned by [`BackgroundRemover::remove`].
pub type RemoveFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RemovedImage, RemoveBgError>> + Send + 'a>>;

/// Removes the background of an image via an external service.
pub trait BackgroundRemover: Send + Sync {
    /// Upload the image and return the processed result.
    fn remove(&self, request: &RemovalRequest) -> RemoveFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
