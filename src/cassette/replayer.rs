//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Interactions from a loaded cassette, queued per `(port, method)` pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Build a replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        let mut ordered = cassette.interactions.clone();
        ordered.sort_by_key(|i| i.seq);
        for interaction in ordered {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction);
        }
        Self { queues }
    }

    /// Take the next recorded interaction for `port::method`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the recorded pairs when nothing is left to serve.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, String> {
        let key = (port.to_string(), method.to_string());
        if let Some(interaction) = self.queues.get_mut(&key).and_then(VecDeque::pop_front) {
            return Ok(interaction);
        }

        let mut recorded: Vec<String> =
            self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
        recorded.sort();
        Err(format!(
            "Cassette exhausted for {port}::{method}. Recorded pairs: [{}]",
            recorded.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    fn interaction(seq: u64, file_name: &str) -> Interaction {
        Interaction {
            seq,
            port: "background_remover".into(),
            method: "remove".into(),
            input: json!({ "file_name": file_name }),
            output: json!({"Ok": {"data": ""}}),
        }
    }

    fn cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        }
    }

    #[test]
    fn serves_by_sequence_number() {
        let mut replayer = CassetteReplayer::new(&cassette(vec![
            interaction(1, "second.png"),
            interaction(0, "first.png"),
        ]));

        let first = replayer.next_interaction("background_remover", "remove").unwrap();
        assert_eq!(first.input["file_name"], "first.png");
        let second = replayer.next_interaction("background_remover", "remove").unwrap();
        assert_eq!(second.seq, 1);
    }

    #[test]
    fn exhausted_queue_is_an_error() {
        let mut replayer = CassetteReplayer::new(&cassette(vec![interaction(0, "only.png")]));
        replayer.next_interaction("background_remover", "remove").unwrap();

        let err = replayer.next_interaction("background_remover", "remove").unwrap_err();
        assert!(err.contains("Cassette exhausted"));
        assert!(err.contains("background_remover::remove"));
    }

    #[test]
    fn unknown_pair_is_an_error() {
        let mut replayer = CassetteReplayer::new(&cassette(vec![]));
        assert!(replayer.next_interaction("other", "call").is_err());
    }
}
