//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable cassette name.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Interactions in recording order.
    pub interactions: Vec<Interaction>,
}

/// One call through a port and its result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Global sequence number within the cassette.
    pub seq: u64,
    /// Port name, e.g. `background_remover`.
    pub port: String,
    /// Method name on the port.
    pub method: String,
    /// Serialized call input.
    pub input: serde_json::Value,
    /// Serialized result using the `Ok`/`Err` convention.
    pub output: serde_json::Value,
}
