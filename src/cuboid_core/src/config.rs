use serde::{Deserialize, Serialize};

/// Tunables of the move player and the solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many inverse moves the undo stack keeps before dropping the oldest.
    pub undo_limit: usize,
    /// Moves applied by a default scramble.
    pub scramble_length: usize,
    /// Seed for the scramble generator; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Algorithms a single solve may emit before it is considered stuck.
    pub max_solver_algorithms: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            undo_limit: 40,
            scramble_length: 20,
            seed: None,
            max_solver_algorithms: 512,
        }
    }
}

impl EngineConfig {
    pub(crate) fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn missing_keys_take_defaults() {
        let config: EngineConfig = toml::from_str("seed = 7\nundo_limit = 5\n").unwrap();
        assert_eq!(
            config,
            EngineConfig {
                undo_limit: 5,
                seed: Some(7),
                ..EngineConfig::default()
            }
        );
    }

    #[test_log::test]
    fn seeded_generators_agree() {
        let config = EngineConfig {
            seed: Some(42),
            ..EngineConfig::default()
        };
        assert_eq!(config.rng().u64(..), config.rng().u64(..));
    }
}
