//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette has no (more) interactions for the
    /// given port/method combination.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<&Interaction, String> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get(&key) else {
            let available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            return Err(format!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            ));
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        let interaction = queue.get(*cursor).ok_or_else(|| {
            format!(
                "Cassette exhausted: all {count} interactions for port={port:?} \
                 method={method:?} have been consumed.",
                count = queue.len(),
            )
        })?;
        *cursor += 1;
        Ok(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, input: serde_json::Value) -> Interaction {
        Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output: json!({"Ok": {}}),
        }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), commit: "abc".into(), interactions }
    }

    #[test]
    fn replays_each_port_in_its_own_order() {
        let cassette = make_cassette(vec![
            interaction(0, "image_generator", "generate", json!({"prompt": "first"})),
            interaction(1, "image_fetcher", "fetch", json!({"url": "https://a"})),
            interaction(2, "image_generator", "generate", json!({"prompt": "second"})),
            interaction(3, "image_fetcher", "fetch", json!({"url": "https://b"})),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("image_generator", "generate").unwrap().seq, 0);
        assert_eq!(replayer.next_interaction("image_generator", "generate").unwrap().seq, 2);
        assert_eq!(replayer.next_interaction("image_fetcher", "fetch").unwrap().seq, 1);
        assert_eq!(replayer.next_interaction("image_fetcher", "fetch").unwrap().seq, 3);
    }

    #[test]
    fn exhausted_queue_is_an_error() {
        let cassette =
            make_cassette(vec![interaction(0, "image_generator", "generate", json!({}))]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert!(replayer.next_interaction("image_generator", "generate").is_ok());
        let err = replayer.next_interaction("image_generator", "generate").unwrap_err();
        assert!(err.contains("have been consumed"));
    }

    #[test]
    fn unknown_port_lists_available_pairs() {
        let cassette = make_cassette(vec![interaction(0, "image_fetcher", "fetch", json!({}))]);
        let mut replayer = CassetteReplayer::new(&cassette);

        let err = replayer.next_interaction("image_generator", "generate").unwrap_err();
        assert!(err.contains("no interactions recorded"));
        assert!(err.contains("image_fetcher::fetch"));
    }
}
