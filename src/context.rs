//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::adapters::live::removebg::RemoveBgClient;
use crate::adapters::recording::background_remover::RecordingBackgroundRemover;
use crate::adapters::replaying::background_remover::ReplayingBackgroundRemover;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::{Config, API_KEY_ENV};
use crate::error::RemoveBgError;
use crate::ports::BackgroundRemover;

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Background remover port.
    pub remover: Box<dyn BackgroundRemover>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Write the recorded cassette to disk.
    ///
    /// The owning [`ServiceContext`] must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder is still shared or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context talking to remove.bg.
    ///
    /// # Errors
    ///
    /// Returns [`RemoveBgError::MissingApiKey`] if no non-blank key is configured.
    pub fn live(config: &Config, timeout: Duration) -> Result<Self, RemoveBgError> {
        let key =
            config.api_key().ok_or(RemoveBgError::MissingApiKey { env_var: API_KEY_ENV.into() })?;
        Ok(Self { remover: Box::new(RemoveBgClient::new(key, timeout)?) })
    }

    /// Create a live context whose calls are recorded to a cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(
        config: &Config,
        timeout: Duration,
    ) -> Result<(Self, RecordingSession), RemoveBgError> {
        let live = Self::live(config, timeout)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".removebg/cassettes")
            .join(&timestamp)
            .join("background_remover.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-background_remover"),
            commit_hash(),
        )));

        let remover = RecordingBackgroundRemover::new(live.remover, Arc::clone(&recorder));
        Ok((Self { remover: Box::new(remover) }, RecordingSession { recorder }))
    }

    /// Create a context that replays a cassette instead of calling remove.bg.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, RemoveBgError> {
        let replayer = load_cassette(path)
            .map_err(|e| RemoveBgError::Config(format!("Failed to load cassette: {e}")))?;
        let remover = ReplayingBackgroundRemover::new(Arc::new(Mutex::new(replayer)));
        Ok(Self { remover: Box::new(remover) })
    }
}

/// Current git commit hash, or "unknown" outside a repository.
fn commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
