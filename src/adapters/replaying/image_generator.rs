//! Replaying adapter for the `ImageGenerator` port.

use super::{next_output, replay_result, SharedReplayer};
use crate::ports::image_generator::{
    GenerateFuture, GenerationRequest, GenerationResponse, ImageGenerator,
};

/// Serves recorded generation results from a cassette.
pub struct ReplayingImageGenerator {
    replayer: SharedReplayer,
}

impl ReplayingImageGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl ImageGenerator for ReplayingImageGenerator {
    fn generate(&self, _api_key: &str, _request: &GenerationRequest) -> GenerateFuture<'_> {
        let output = next_output(&self.replayer, "image_generator", "generate");
        Box::pin(async move { replay_result::<GenerationResponse>(output?) })
    }
}
