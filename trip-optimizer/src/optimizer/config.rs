//! Explorer configuration.

/// Candidate count up to which the explorer enumerates every candidate
/// instead of sampling. Route alternative lists are normally tens of
/// entries, so the exhaustive path is the one that runs in practice.
pub const DEFAULT_EXHAUSTIVE_THRESHOLD: usize = 2000;

/// Configuration parameters for the frontier explorer.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Largest candidate count handled exhaustively. Above this the
    /// explorer switches to seeded population sampling.
    pub exhaustive_threshold: usize,

    /// Population size for the sampling path (capped at the candidate
    /// count).
    pub population_size: usize,

    /// Number of generations the sampling path runs.
    pub generations: usize,

    /// Seed for the sampling path. Fixed by default so identical inputs
    /// give identical frontiers.
    pub seed: u64,
}

impl ExplorerConfig {
    /// Create a configuration with the given parameters.
    pub fn new(
        exhaustive_threshold: usize,
        population_size: usize,
        generations: usize,
        seed: u64,
    ) -> Self {
        Self {
            exhaustive_threshold,
            population_size,
            generations,
            seed,
        }
    }

    /// Replace the exhaustive threshold.
    pub fn with_exhaustive_threshold(mut self, threshold: usize) -> Self {
        self.exhaustive_threshold = threshold;
        self
    }

    /// Replace the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            exhaustive_threshold: DEFAULT_EXHAUSTIVE_THRESHOLD,
            population_size: 80,
            generations: 80,
            seed: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ExplorerConfig::default();

        assert_eq!(config.exhaustive_threshold, DEFAULT_EXHAUSTIVE_THRESHOLD);
        assert_eq!(config.population_size, 80);
        assert_eq!(config.generations, 80);
        assert_eq!(config.seed, 1);
    }

    #[test]
    fn builders_replace_fields() {
        let config = ExplorerConfig::default()
            .with_exhaustive_threshold(0)
            .with_seed(42);

        assert_eq!(config.exhaustive_threshold, 0);
        assert_eq!(config.seed, 42);
        assert_eq!(config.population_size, 80);
    }
}
