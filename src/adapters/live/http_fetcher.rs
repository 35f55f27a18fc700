//! Live adapter that downloads image bytes over plain HTTP.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::error::ImageError;
use crate::ports::image_fetcher::{FetchFuture, FetchedImage, ImageFetcher};

/// Unauthenticated GET of an image URL using the client defaults.
#[derive(Default)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// Create a fetcher with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let url = url.to_string();
        Box::pin(async move {
            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ImageError::ImageFetch { status: status.as_u16(), url });
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let data = response.bytes().await?.to_vec();

            tracing::debug!(bytes = data.len(), content_type = ?content_type, "fetched image");
            Ok(FetchedImage { data, content_type })
        })
    }
}
