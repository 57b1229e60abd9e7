use crate::corpus::LoadOptions;
use crate::synth::{SeedFilter, DEFAULT_SIZES, PALETTES_PER_SIZE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesisConfig {
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    #[serde(default = "default_palettes_per_size")]
    pub palettes_per_size: usize,
    #[serde(default = "default_seed_min_saturation")]
    pub seed_min_saturation: f64,
    #[serde(default = "default_seed_min_value")]
    pub seed_min_value: f64,
    /// Catalog entries that are markers rather than colors (compared case-insensitively)
    #[serde(default = "default_excluded_seed_names")]
    pub excluded_seed_names: Vec<String>,
    /// Fan seeds out over the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Fixed RNG seed for reproducible runs
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// Abort the sweep after this many seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_sizes() -> Vec<usize> {
    DEFAULT_SIZES.to_vec()
}

fn default_palettes_per_size() -> usize {
    PALETTES_PER_SIZE
}

fn default_seed_min_saturation() -> f64 {
    0.1
}

fn default_seed_min_value() -> f64 {
    0.15
}

fn default_excluded_seed_names() -> Vec<String> {
    vec!["Colorless Blender".to_string()]
}

fn default_parallel() -> bool {
    true
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            palettes_per_size: default_palettes_per_size(),
            seed_min_saturation: default_seed_min_saturation(),
            seed_min_value: default_seed_min_value(),
            excluded_seed_names: default_excluded_seed_names(),
            parallel: default_parallel(),
            rng_seed: None,
            timeout_secs: None,
        }
    }
}

impl SynthesisConfig {
    pub fn seed_filter(&self) -> SeedFilter {
        SeedFilter {
            min_saturation: self.seed_min_saturation,
            min_value: self.seed_min_value,
            excluded_names: self.excluded_seed_names.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
    /// Placeholder hex values dropped while loading
    #[serde(default = "default_skip_hex")]
    pub skip_hex: Vec<String>,
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("static/data/ColorData.json")
}

fn default_skip_hex() -> Vec<String> {
    vec!["#ffffff".to_string()]
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
            skip_hex: default_skip_hex(),
        }
    }
}

impl CorpusConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            skip_hex: self.skip_hex.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("generated_themes.json")
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            pretty: default_pretty(),
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "swatchy", "swatchy")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Load config from the default location, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let config = Self::load_from(&path)?;
        if !path.exists() {
            if let Err(e) = config.save_to(&path) {
                warn!(path = %path.display(), error = %e, "could not write default config");
            }
        }
        Ok(config)
    }

    /// Load config from `path`. Missing files give defaults; unparsable ones
    /// give defaults with a warning and are left untouched on disk.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        match toml::from_str::<Config>(&data) {
            Ok(config) => Ok(config.expanded()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse config, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)?;

        Ok(())
    }

    fn expanded(mut self) -> Self {
        self.corpus.path = crate::utils::expand_tilde(&self.corpus.path);
        self.output.path = crate::utils::expand_tilde(&self.output.path);
        self
    }
}
