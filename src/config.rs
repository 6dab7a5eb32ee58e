use crate::blocking::{DEFAULT_WINDOW, PlateauRule};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Analysis configuration parameters.
///
/// Loaded from a TOML file and validated before use. Every section and field is
/// optional and falls back to its default.
/// See [`AnalysisConfig::from_file`] for loading.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Blocking parameters.
    pub blocking: BlockingConfig,
    /// Bootstrap parameters.
    pub bootstrap: BootstrapConfig,
    /// Equilibration parameters.
    pub equil: EquilConfig,
}

/// Plateau reading strategy of the blocking method.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plateau {
    #[default]
    TrailingWindow,
    ErrorBound,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlockingConfig {
    /// Largest block size tried.
    pub max_block_size: usize,
    /// Plateau reading strategy.
    pub plateau: Plateau,
    /// Number of trailing entries averaged by the trailing window strategy.
    pub window: usize,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            max_block_size: 500,
            plateau: Plateau::default(),
            window: DEFAULT_WINDOW,
        }
    }
}

impl BlockingConfig {
    pub fn plateau_rule(&self) -> PlateauRule {
        match self.plateau {
            Plateau::TrailingWindow => PlateauRule::TrailingWindow {
                window: self.window,
            },
            Plateau::ErrorBound => PlateauRule::ErrorBound,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Number of resamples.
    pub n_resamples: usize,
    /// Random seed (drawn from the OS when absent).
    pub seed: Option<u64>,
    /// Spread the resamples over all cores.
    pub parallel: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            n_resamples: 1000,
            seed: None,
            parallel: false,
        }
    }
}

#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EquilConfig {
    /// Discard the values before the equilibration index.
    pub trim: bool,
}

impl AnalysisConfig {
    /// Load an [`AnalysisConfig`] from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate an [`AnalysisConfig`] from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AnalysisConfig =
            toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_num(self.blocking.max_block_size, 1..=1_000_000)
            .context("invalid maximum block size")?;
        check_num(self.blocking.window, 1..=100_000).context("invalid plateau window")?;
        check_num(self.bootstrap.n_resamples, 1..=10_000_000)
            .context("invalid number of resamples")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AnalysisConfig::from_toml("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.blocking.max_block_size, 500);
        assert_eq!(config.blocking.plateau_rule(), PlateauRule::default());
        assert_eq!(config.bootstrap.n_resamples, 1000);
        assert_eq!(config.bootstrap.seed, None);
        assert!(!config.equil.trim);
    }

    #[test]
    fn full_config_is_parsed() {
        let contents = String::new()
            + "[blocking]\n"
            + "max_block_size = 64\n"
            + "plateau = \"error-bound\"\n"
            + "\n"
            + "[bootstrap]\n"
            + "n_resamples = 5000\n"
            + "seed = 42\n"
            + "parallel = true\n"
            + "\n"
            + "[equil]\n"
            + "trim = true\n";

        let config = AnalysisConfig::from_toml(&contents).unwrap();
        assert_eq!(config.blocking.max_block_size, 64);
        assert_eq!(config.blocking.plateau_rule(), PlateauRule::ErrorBound);
        assert_eq!(config.bootstrap.n_resamples, 5000);
        assert_eq!(config.bootstrap.seed, Some(42));
        assert!(config.bootstrap.parallel);
        assert!(config.equil.trim);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = AnalysisConfig::from_toml("[bootstrap]\nn_resamples = 0\n").unwrap_err();
        assert!(format!("{err:#}").contains("invalid number of resamples"));

        assert!(AnalysisConfig::from_toml("[blocking]\nwindow = 0\n").is_err());
        assert!(AnalysisConfig::from_toml("[blocking]\nplateau = \"guess\"\n").is_err());
        assert!(AnalysisConfig::from_toml("[sampling]\nn = 1\n").is_err());
    }
}
