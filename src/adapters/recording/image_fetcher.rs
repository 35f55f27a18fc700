//! Recording adapter for the `ImageFetcher` port.

use std::sync::Arc;

use super::{record_result, SharedRecorder};
use crate::ports::image_fetcher::{FetchFuture, ImageFetcher};

/// Records image downloads while delegating to an inner implementation.
pub struct RecordingImageFetcher {
    inner: Box<dyn ImageFetcher>,
    recorder: SharedRecorder,
}

impl RecordingImageFetcher {
    /// Creates a new recording fetcher wrapping the given implementation.
    pub fn new(inner: Box<dyn ImageFetcher>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl ImageFetcher for RecordingImageFetcher {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let url = url.to_string();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.fetch(&url).await;
            let input = serde_json::json!({ "url": url });
            record_result(&recorder, "image_fetcher", "fetch", &input, &result);
            result
        })
    }
}
