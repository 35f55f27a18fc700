//! Image generator port for the image generation provider.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ImageError;
use crate::params::ImageSize;

/// Model identifier sent with every request.
pub const MODEL: &str = "dall-e-3";

/// Quality tier sent with every request.
pub const QUALITY: &str = "standard";

/// A request to generate a single image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The model identifier.
    pub model: String,
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Requested image size.
    pub size: ImageSize,
    /// Quality tier.
    pub quality: String,
    /// Number of images to generate.
    pub count: u32,
}

impl GenerationRequest {
    /// Build the fixed single-image, standard-quality request for a prompt.
    #[must_use]
    pub fn new(prompt: impl Into<String>, size: ImageSize) -> Self {
        Self {
            model: MODEL.to_string(),
            prompt: prompt.into(),
            size,
            quality: QUALITY.to_string(),
            count: 1,
        }
    }
}

/// Locations of the images the provider produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Image URLs, in provider order.
    pub urls: Vec<String>,
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerationResponse, ImageError>> + Send + 'a>>;

/// Generates images from text prompts via an external API.
pub trait ImageGenerator: Send + Sync {
    /// Generate images for the given request, authenticating with `api_key`.
    fn generate(&self, api_key: &str, request: &GenerationRequest) -> GenerateFuture<'_>;
}
