//! Image fetcher port for downloading generated images by URL.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Raw bytes retrieved from an image location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedImage {
    /// Raw image bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// `Content-Type` reported by the image host, if any.
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Boxed future type returned by [`ImageFetcher::fetch`].
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<FetchedImage, ImageError>> + Send + 'a>>;

/// Retrieves raw image bytes from a URL.
pub trait ImageFetcher: Send + Sync {
    /// Fetch the bytes at `url`.
    fn fetch(&self, url: &str) -> FetchFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_stored_as_base64() {
        let image = FetchedImage {
            data: vec![0x89, 0x50, 0x4E, 0x47],
            content_type: Some("image/png".into()),
        };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["data"], "iVBORw==");

        let back: FetchedImage = serde_json::from_value(json).unwrap();
        assert_eq!(back.data, vec![0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(back.content_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn content_type_is_optional() {
        let back: FetchedImage = serde_json::from_str(r#"{"data": "AQID"}"#).unwrap();
        assert_eq!(back.data, vec![1, 2, 3]);
        assert!(back.content_type.is_none());
    }
}
