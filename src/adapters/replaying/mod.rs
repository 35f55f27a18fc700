//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_fetcher;
pub mod image_generator;

use std::sync::{Arc, Mutex, PoisonError};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::ImageError;

/// Shared handle the replaying adapters read from.
pub type SharedReplayer = Arc<Mutex<CassetteReplayer>>;

/// Retrieve the next recorded output for a given port and method.
pub(crate) fn next_output(
    replayer: &SharedReplayer,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, ImageError> {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard
        .next_interaction(port, method)
        .map(|interaction| interaction.output.clone())
        .map_err(ImageError::Replay)
}

/// Deserialize a replayed output recorded with the Ok/Err convention.
///
/// A recorded `Err` comes back as [`ImageError::Recorded`] with the original
/// text, so the collapsed user-facing message matches the recorded run.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, ImageError> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let message = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(ImageError::Recorded(message));
    }
    let ok_val = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(ok_val)
        .map_err(|e| ImageError::Replay(format!("Malformed recorded output: {e}")))
}
