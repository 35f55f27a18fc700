//! Recording adapter for the `ImageGenerator` port.

use std::sync::Arc;

use super::{record_result, SharedRecorder};
use crate::ports::image_generator::{GenerateFuture, GenerationRequest, ImageGenerator};

/// Records image generation calls while delegating to an inner implementation.
///
/// Only the request is recorded; the API key never reaches the cassette.
pub struct RecordingImageGenerator {
    inner: Box<dyn ImageGenerator>,
    recorder: SharedRecorder,
}

impl RecordingImageGenerator {
    /// Creates a new recording generator wrapping the given implementation.
    pub fn new(inner: Box<dyn ImageGenerator>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl ImageGenerator for RecordingImageGenerator {
    fn generate(&self, api_key: &str, request: &GenerationRequest) -> GenerateFuture<'_> {
        let api_key = api_key.to_string();
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&api_key, &request).await;
            record_result(&recorder, "image_generator", "generate", &request, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::error::ImageError;
    use crate::params::ImageSize;
    use crate::ports::image_generator::GenerationResponse;

    struct StubGenerator;

    impl ImageGenerator for StubGenerator {
        fn generate(&self, api_key: &str, _request: &GenerationRequest) -> GenerateFuture<'_> {
            let ok = api_key == "sk-good";
            Box::pin(async move {
                if ok {
                    Ok(GenerationResponse { urls: vec!["https://images.example/a.png".into()] })
                } else {
                    Err(ImageError::Api { status: 401, message: "bad key".into() })
                }
            })
        }
    }

    #[tokio::test]
    async fn records_outcomes_without_the_api_key() {
        let path = std::env::temp_dir().join("dalle_form_recording_gen_test.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "t", "c")));
        let generator = RecordingImageGenerator::new(Box::new(StubGenerator), Arc::clone(&recorder));
        let request = GenerationRequest::new("a cat", ImageSize::S1024x1024);

        assert!(generator.generate("sk-good", &request).await.is_ok());
        assert!(generator.generate("sk-bad", &request).await.is_err());
        drop(generator);

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        assert_eq!(recorder.len(), 2);
        let written = recorder.finish().unwrap();
        let yaml = std::fs::read_to_string(&written).unwrap();
        assert!(yaml.contains("https://images.example/a.png"));
        assert!(yaml.contains("API error (401): bad key"));
        assert!(!yaml.contains("sk-good"));
        assert!(!yaml.contains("sk-bad"));

        let _ = std::fs::remove_file(&written);
    }
}
