use std::path::{Path, PathBuf};

use anchor_core::{
    DistilledLetters, RasterConfig, SigilVariant, StructureMatchConfig, normalize_letters,
};
use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "ANCHOR_CONFIG";

/// Letters used when an intention distills to nothing ("anchor" without vowels).
pub const DEFAULT_FALLBACK: &str = "NCHR";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub default_variant: SigilVariant,
    pub fallback_letters: String,
    pub raster: RasterConfig,
    pub structure: StructureMatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_variant: SigilVariant::default(),
            fallback_letters: DEFAULT_FALLBACK.to_string(),
            raster: RasterConfig::default(),
            structure: StructureMatchConfig::default(),
        }
    }
}

impl Config {
    /// Resolve and load the config: explicit path, then `$ANCHOR_CONFIG`, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let Some(path) = path else {
            tracing::debug!("no config file, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.raster.validate()?;
        self.structure.validate()?;
        if self.fallback().is_empty() {
            bail!("fallback_letters must contain at least one ASCII letter");
        }
        Ok(())
    }

    pub fn fallback(&self) -> DistilledLetters {
        normalize_letters(self.fallback_letters.chars()).0
    }
}
