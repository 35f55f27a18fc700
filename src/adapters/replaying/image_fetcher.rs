//! Replaying adapter for the `ImageFetcher` port.

use super::{next_output, replay_result, SharedReplayer};
use crate::ports::image_fetcher::{FetchFuture, FetchedImage, ImageFetcher};

/// Serves recorded image bytes from a cassette.
pub struct ReplayingImageFetcher {
    replayer: SharedReplayer,
}

impl ReplayingImageFetcher {
    /// Create a replaying fetcher backed by the given replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl ImageFetcher for ReplayingImageFetcher {
    fn fetch(&self, _url: &str) -> FetchFuture<'_> {
        let output = next_output(&self.replayer, "image_fetcher", "fetch");
        Box::pin(async move { replay_result::<FetchedImage>(output?) })
    }
}
