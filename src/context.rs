//! Service context that bundles the port trait objects for one run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::http_fetcher::HttpImageFetcher;
use crate::adapters::live::openai::OpenAiGenerator;
use crate::adapters::recording::image_fetcher::RecordingImageFetcher;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::replaying::image_fetcher::ReplayingImageFetcher;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::coordinator::RequestCoordinator;
use crate::error::ImageError;
use crate::labels::Locale;
use crate::ports::{ImageFetcher, ImageGenerator};

/// Directory recordings are written under.
pub const CASSETTE_ROOT: &str = ".dalle-form/cassettes";

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Image generator port.
    pub generator: Box<dyn ImageGenerator>,
    /// Image fetcher port.
    pub fetcher: Box<dyn ImageFetcher>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// Call after the [`ServiceContext`] (and any coordinator built from it)
    /// has been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        if recorder.is_empty() {
            tracing::warn!("no interactions were recorded");
        }
        tracing::debug!(interactions = recorder.len(), path = %recorder.path().display(), "writing cassette");
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Live context against the configured provider endpoint.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self {
            generator: Box::new(OpenAiGenerator::new(config.provider.base_url.clone())),
            fetcher: Box::new(HttpImageFetcher::new()),
        }
    }

    /// Live context whose ports also record every interaction.
    #[must_use]
    pub fn recording(config: &Config) -> (Self, RecordingSession) {
        let live = Self::live(config);
        let recorder = Arc::new(Mutex::new(CassetteRecorder::for_session(
            Path::new(CASSETTE_ROOT),
            get_commit_hash(),
        )));

        let ctx = Self {
            generator: Box::new(RecordingImageGenerator::new(live.generator, Arc::clone(&recorder))),
            fetcher: Box::new(RecordingImageFetcher::new(live.fetcher, Arc::clone(&recorder))),
        };
        (ctx, RecordingSession { recorder })
    }

    /// Context that serves both ports from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, ImageError> {
        let replayer = load_cassette(path)
            .map_err(|e| ImageError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        Ok(Self {
            generator: Box::new(ReplayingImageGenerator::new(Arc::clone(&replayer))),
            fetcher: Box::new(ReplayingImageFetcher::new(replayer)),
        })
    }

    /// Wire the ports into a coordinator.
    #[must_use]
    pub fn into_coordinator(self, locale: Locale) -> RequestCoordinator {
        RequestCoordinator::new(self.generator, self.fetcher).with_locale(locale)
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
