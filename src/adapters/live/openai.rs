//! Live adapter for the `OpenAI` Images API.

use reqwest::Client;
use serde::Deserialize;

use crate::error::ImageError;
use crate::ports::image_generator::{
    GenerateFuture, GenerationRequest, GenerationResponse, ImageGenerator,
};

/// Default API host.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

const GENERATIONS_PATH: &str = "/v1/images/generations";

/// Live `OpenAI` image generator that calls the `OpenAI` Images API.
pub struct OpenAiGenerator {
    client: Client,
    base_url: String,
}

impl OpenAiGenerator {
    /// Create a generator targeting `base_url` (e.g. `https://api.openai.com`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client: Client::new(), base_url }
    }
}

impl Default for OpenAiGenerator {
    fn default() -> Self {
        Self::new(OPENAI_BASE_URL)
    }
}

impl ImageGenerator for OpenAiGenerator {
    fn generate(&self, api_key: &str, request: &GenerationRequest) -> GenerateFuture<'_> {
        let api_key = api_key.to_string();
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}{GENERATIONS_PATH}", self.base_url);
            let body = serde_json::json!({
                "model": request.model,
                "prompt": request.prompt,
                "size": request.size,
                "quality": request.quality,
                "n": request.count,
            });

            tracing::debug!(model = %request.model, size = %request.size, "requesting image generation");

            let response = self
                .client
                .post(&url)
                .bearer_auth(&api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(ImageError::Api {
                    status: status.as_u16(),
                    message: api_error_message(&response_text),
                });
            }

            let parsed: OpenAiResponse = serde_json::from_str(&response_text).map_err(|e| {
                ImageError::Api { status: 200, message: format!("Failed to parse response: {e}") }
            })?;

            let urls: Vec<String> = parsed.data.into_iter().filter_map(|item| item.url).collect();
            if urls.is_empty() {
                return Err(ImageError::NoImageUrl);
            }

            tracing::debug!(count = urls.len(), "provider returned image locations");
            Ok(GenerationResponse { urls })
        })
    }
}

/// Pull `error.message` out of an `OpenAI` error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<OpenAiErrorBody>(body)
        .map_or_else(|_| body.to_string(), |parsed| parsed.error.message)
}

// --- OpenAI API response types ---

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    data: Vec<OpenAiImageData>,
}

#[derive(Deserialize)]
struct OpenAiImageData {
    url: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}
