//! Recording adapters that capture interactions to cassettes.

pub mod background_remover;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction using the `Ok`/`Err` JSON convention.
///
/// Serialization failures are logged and the interaction is skipped; a
/// broken recording never fails the call being recorded.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = match serde_json::to_value(input) {
        Ok(v) => v,
        Err(e) => {
            warn!(port, method, "skipping recording, input not serializable: {e}");
            return;
        }
    };

    let output_json = match result {
        Ok(v) => match serde_json::to_value(v) {
            Ok(inner) => serde_json::json!({ "Ok": inner }),
            Err(e) => {
                warn!(port, method, "skipping recording, output not serializable: {e}");
                return;
            }
        },
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };

    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input_json, output_json),
        Err(e) => warn!(port, method, "recorder lock poisoned: {e}"),
    }
}
