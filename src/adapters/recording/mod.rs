//! Recording adapters that capture interactions to cassettes.

pub mod image_fetcher;
pub mod image_generator;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;

use crate::cassette::recorder::CassetteRecorder;

/// Shared handle the recording adapters write into.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = to_json(input);
    let output_json = match result {
        Ok(v) => serde_json::json!({ "Ok": to_json(v) }),
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };

    // A panic elsewhere must not lose the recording made so far.
    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, input_json, output_json);
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to serialize interaction for cassette");
        Value::Null
    })
}
