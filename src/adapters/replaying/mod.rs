//! Replaying adapters that serve recorded interactions from cassettes.

pub mod background_remover;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::RemoveBgError;

/// Pull the next recorded output for `port::method` and decode it.
///
/// Recorded `Err` values come back as [`RemoveBgError::Replayed`].
pub(crate) fn replay_next<T: DeserializeOwned>(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<T, RemoveBgError> {
    let output = {
        let mut guard = replayer
            .lock()
            .map_err(|e| RemoveBgError::Config(format!("Replayer lock poisoned: {e}")))?;
        guard.next_interaction(port, method).map_err(RemoveBgError::Config)?.output
    };

    if let Some(err) = output.get("Err") {
        let message = err.as_str().unwrap_or("replayed error").to_string();
        return Err(RemoveBgError::Replayed(message));
    }
    let ok = output.get("Ok").cloned().unwrap_or(output);
    serde_json::from_value(ok).map_err(|e| RemoveBgError::Decode(e.to_string()))
}
