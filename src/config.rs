use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Artifact storage configuration
    pub artifacts: ArtifactSettings,

    /// Training configuration
    #[serde(default)]
    pub training: TrainingSettings,

    /// Synthetic corpus generation configuration
    #[serde(default)]
    pub generator: GeneratorSettings,
}

impl CoreConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("ATTRITION_CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: ATTRITION)
            .add_source(
                config::Environment::with_prefix("ATTRITION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSettings {
    /// Directory holding the persisted artifact set
    #[serde(default = "default_artifact_dir")]
    pub dir: PathBuf,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            dir: default_artifact_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSettings {
    /// Seed for splits and bootstrap sampling
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Held-out fraction for model evaluation
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            test_fraction: default_test_fraction(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Seed for corpus generation
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of synthetic records to generate
    #[serde(default = "default_generator_records")]
    pub records: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            records: default_generator_records(),
        }
    }
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("data/artifacts")
}

fn default_seed() -> u64 {
    42
}

fn default_test_fraction() -> f64 {
    0.2
}

fn default_generator_records() -> usize {
    500
}
