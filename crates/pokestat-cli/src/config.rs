//! Command-line arguments shared by every subcommand.

use std::path::PathBuf;

use pokestat_analysis::report::AnalysisConfig;

use crate::util;

/// Paths of the two input tables.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DatasetArg {
    /// Entity catalog JSON file (array of pokemon records)
    pub pokemon_file: PathBuf,
    /// Battle log JSON file (array of combat records)
    pub combats_file: PathBuf,
}

/// Analysis settings, read from `--config` and overridden by flags.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AnalysisArg {
    /// JSON file with analysis settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed of the importance forest
    #[arg(long)]
    seed: Option<u64>,
    /// Number of trees in the importance forest
    #[arg(long)]
    trees: Option<usize>,
    /// Number of bins in the win-count histogram
    #[arg(long)]
    bins: Option<usize>,
    /// Number of entities in the top winners table
    #[arg(long)]
    top: Option<usize>,
}

impl AnalysisArg {
    pub fn resolve(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file::<AnalysisConfig, _>("analysis config", path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.forest.seed = seed;
        }
        if let Some(trees) = self.trees {
            config.forest.n_trees = trees;
        }
        if let Some(bins) = self.bins {
            config.histogram_bins = bins;
        }
        if let Some(top) = self.top {
            config.top_n = top;
        }

        anyhow::ensure!(config.forest.n_trees > 0, "forest needs at least one tree");
        anyhow::ensure!(config.histogram_bins > 0, "histogram needs at least 1 bin");
        tracing::debug!(?config, "resolved analysis config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let config = AnalysisArg::default().resolve().unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let path = env::temp_dir().join(format!("pokestat-config-{}.json", process::id()));
        let json = r#"{"histogram_bins": 12, "forest": {"seed": 7, "n_trees": 50}}"#;
        fs::write(&path, json).unwrap();

        let arg = AnalysisArg {
            config: Some(path.clone()),
            seed: Some(99),
            top: Some(20),
            ..AnalysisArg::default()
        };
        let config = arg.resolve().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.forest.seed, 99);
        assert_eq!(config.forest.n_trees, 50);
        assert_eq!(config.histogram_bins, 12);
        assert_eq!(config.top_n, 20);
    }

    #[test]
    fn test_rejects_zero_trees_and_bins() {
        let arg = AnalysisArg {
            trees: Some(0),
            ..AnalysisArg::default()
        };
        assert!(arg.resolve().is_err());

        let arg = AnalysisArg {
            bins: Some(0),
            ..AnalysisArg::default()
        };
        assert!(arg.resolve().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let arg = AnalysisArg {
            config: Some(PathBuf::from("/nonexistent/pokestat.json")),
            ..AnalysisArg::default()
        };
        let err = arg.resolve().unwrap_err();
        assert!(err.to_string().contains("analysis config"));
    }
}
