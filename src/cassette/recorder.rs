//! Collects interactions and writes them as a YAML cassette.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Accumulates interactions until [`CassetteRecorder::finish`] writes them out.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a recorder targeting `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), name: name.into(), commit: commit.into(), interactions: vec![] }
    }

    /// Append an interaction; sequence numbers follow insertion order.
    pub fn record(
        &mut self,
        port: &str,
        method: &str,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.to_string(),
            method: method.to_string(),
            input,
            output,
        });
    }

    /// Write the cassette, creating parent directories, and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn finish_writes_yaml_with_sequence_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/session.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "session", "deadbeef");
        recorder.record(
            "background_remover",
            "remove",
            json!({"file_name": "cat.png"}),
            json!({"Ok": {"data": "AQID"}}),
        );
        recorder.record(
            "background_remover",
            "remove",
            json!({"file_name": "dog.png"}),
            json!({"Err": "remove.bg rejected the request (402): no credits"}),
        );

        assert_eq!(recorder.finish().unwrap(), path);

        let content = std::fs::read_to_string(&path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.commit, "deadbeef");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].seq, 0);
        assert_eq!(cassette.interactions[1].seq, 1);
        assert_eq!(cassette.interactions[1].input["file_name"], "dog.png");
    }
}
