use std::io::Write;
use serde::{Deserialize, Serialize};

/// Evaluation weights, in the engine's centipawn-like units. The
/// defaults are the tuned values the engine plays with; a JSON file lets
/// a match runner experiment without rebuilding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub piece_strength: i32,
    pub movers: i32,
    pub kings_row: i32,
    pub edges: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            piece_strength: 256,
            movers: 2,
            kings_row: 16,
            edges: 8,
        }
    }
}

impl EvalWeights {
    pub fn save_to_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    pub fn load_from_json(path: &str) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let weights = serde_json::from_reader(reader)?;
        Ok(weights)
    }

    /// Weights from `path` when it exists and parses, defaults otherwise.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load_from_json(path) {
            Ok(w) => {
                log::info!("loaded evaluation weights from {}", path);
                w
            }
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_tuned_values() {
        let w = EvalWeights::default();
        assert_eq!(w.piece_strength, 256);
        assert_eq!(w.movers, 2);
        assert_eq!(w.kings_row, 16);
        assert_eq!(w.edges, 8);
    }

    #[test]
    fn json_round_trip() {
        let dir = std::env::temp_dir().join("ember_weights_test.json");
        let path = dir.to_str().unwrap();
        let w = EvalWeights {
            piece_strength: 300,
            ..Default::default()
        };
        w.save_to_json(path).unwrap();
        let loaded = EvalWeights::load_from_json(path).unwrap();
        assert_eq!(loaded, w);
        assert_eq!(EvalWeights::load_or_default(path), w);
        let _ = std::fs::remove_file(path);
        assert_eq!(
            EvalWeights::load_or_default(path),
            EvalWeights::default()
        );
    }
}
