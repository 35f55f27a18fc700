//! Runs one generation request end to end: provider call, image fetch, decode.

use image::DynamicImage;

use crate::error::ImageError;
use crate::labels::Locale;
use crate::params::ImageSize;
use crate::ports::{GenerationRequest, ImageFetcher, ImageGenerator};

/// Outcome of one generate action.
#[derive(Debug)]
pub enum GenerationResult {
    /// The image was produced, fetched and decoded.
    Success {
        /// Decoded image.
        image: DynamicImage,
        /// Prompt the image was generated from.
        prompt: String,
    },
    /// Any step failed; `message` is ready to show to the user.
    Failure {
        /// Collapsed error message including the underlying error text.
        message: String,
    },
}

/// Drives the provider and fetcher ports for a single request.
pub struct RequestCoordinator {
    generator: Box<dyn ImageGenerator>,
    fetcher: Box<dyn ImageFetcher>,
    locale: Locale,
}

impl RequestCoordinator {
    /// Build a coordinator over the given ports.
    #[must_use]
    pub fn new(generator: Box<dyn ImageGenerator>, fetcher: Box<dyn ImageFetcher>) -> Self {
        Self { generator, fetcher, locale: Locale::default() }
    }

    /// Language of the failure message.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Generate one image for `prompt` at `size`.
    ///
    /// Provider, fetch and decode failures all collapse into
    /// [`GenerationResult::Failure`]; nothing is retried.
    pub async fn generate(&self, api_key: &str, prompt: &str, size: ImageSize) -> GenerationResult {
        match self.try_generate(api_key, prompt, size).await {
            Ok(image) => GenerationResult::Success { image, prompt: prompt.to_string() },
            Err(e) => {
                tracing::debug!(error = %e, "image generation failed");
                GenerationResult::Failure { message: self.locale.generation_error(&e.to_string()) }
            }
        }
    }

    async fn try_generate(
        &self,
        api_key: &str,
        prompt: &str,
        size: ImageSize,
    ) -> Result<DynamicImage, ImageError> {
        let request = GenerationRequest::new(prompt, size);
        let response = self.generator.generate(api_key, &request).await?;
        let url = response.urls.first().ok_or(ImageError::NoImageUrl)?;

        let fetched = self.fetcher.fetch(url).await?;
        let image = image::load_from_memory(&fetched.data)?;
        tracing::info!(width = image.width(), height = image.height(), %size, "image generated");
        Ok(image)
    }
}
