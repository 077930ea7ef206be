use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

/// Window/lookback configuration threaded through one derivation run.
/// Immutable once built; there is no ambient pipeline state.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureConfig {
    /// Moving-average window lengths, in trading days.
    #[serde(default = "default_ma_windows")]
    pub ma_windows: Vec<usize>,
    /// RSI lookback lengths, in trading days.
    #[serde(default = "default_rsi_lookbacks")]
    pub rsi_lookbacks: Vec<usize>,
    /// Fast EMA window for the short crossover columns.
    #[serde(default = "default_fast_window")]
    pub fast_window: usize,
    /// Long-horizon crossover pair (fast, slow).
    #[serde(default = "default_long_crossover")]
    pub long_crossover: (usize, usize),
    /// Number of forward percentage-change targets to assemble.
    #[serde(default = "default_predict_days")]
    pub predict_days: usize,
}

fn default_ma_windows() -> Vec<usize> {
    vec![5, 10, 15, 20, 30, 50, 100, 200]
}

fn default_rsi_lookbacks() -> Vec<usize> {
    vec![2, 3, 4, 5, 6]
}

fn default_fast_window() -> usize {
    5
}

fn default_long_crossover() -> (usize, usize) {
    (50, 100)
}

fn default_predict_days() -> usize {
    5
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            ma_windows: default_ma_windows(),
            rsi_lookbacks: default_rsi_lookbacks(),
            fast_window: default_fast_window(),
            long_crossover: default_long_crossover(),
            predict_days: default_predict_days(),
        }
    }
}

impl FeatureConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            .add_source(File::new(path, FileFormat::Toml))
            .build()?;

        cfg.try_deserialize()
    }

    /// All (fast, slow) EMA pairs tracked by the crossover transform: one per
    /// configured window slower than the fast one, plus the long-horizon pair.
    pub fn crossover_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = self
            .ma_windows
            .iter()
            .filter(|&&w| w > self.fast_window)
            .map(|&w| (self.fast_window, w))
            .collect();
        if !pairs.contains(&self.long_crossover) {
            pairs.push(self.long_crossover);
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_overrides_merge_with_defaults() {
        let path = std::env::temp_dir().join(format!("features_{}.toml", std::process::id()));
        std::fs::write(&path, "ma_windows = [5, 20]\npredict_days = 3\n").unwrap();
        let cfg = FeatureConfig::from_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.ma_windows, vec![5, 20]);
        assert_eq!(cfg.predict_days, 3);
        assert_eq!(cfg.rsi_lookbacks, vec![2, 3, 4, 5, 6]);
        assert_eq!(cfg.crossover_pairs(), vec![(5, 20), (50, 100)]);
    }

    #[test]
    fn default_pairs_cover_every_slow_window_and_the_long_pair() {
        let pairs = FeatureConfig::default().crossover_pairs();
        assert_eq!(
            pairs,
            vec![
                (5, 10),
                (5, 15),
                (5, 20),
                (5, 30),
                (5, 50),
                (5, 100),
                (5, 200),
                (50, 100),
            ]
        );
    }
}
