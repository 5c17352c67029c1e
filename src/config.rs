//! Configuration structures for the analytics engine.
//!
//! Strongly-typed configuration loaded from a TOML file, covering the
//! dataset location, rating-model hyperparameters and recommender settings.

use serde::Deserialize;
use std::error::Error;

/// Main configuration structure loaded from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Dataset location and split ratio
    pub data: DataConfig,
    /// Rating model hyperparameters
    pub model: ModelConfig,
    /// Recommender settings
    pub recommender: RecommenderConfig,
}

/// Dataset configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path to the CSV dataset file
    pub csv_path: String,
    /// Train/test split ratio (e.g., 0.8 = 80% train, 20% test)
    pub train_split: f64,
}

/// Rating model hyperparameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Number of trees in the random forest
    pub n_trees: usize,
    /// Seed for the split shuffle and the per-tree bootstrap draws.
    /// A fixed seed makes training fully reproducible on the same table.
    pub seed: u64,
    /// Number of held-out (actual, predicted) pairs kept for charting
    pub history_len: usize,
}

/// Recommender settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommenderConfig {
    /// Default number of similar restaurants to return
    pub top_n: usize,
    /// Maximum TF-IDF vocabulary size over the cuisine column
    pub max_features: usize,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for EngineConfig {
    /// Get default configuration if `config.toml` is not available.
    fn default() -> Self {
        EngineConfig {
            data: DataConfig {
                csv_path: "Dataset.csv".to_string(),
                train_split: 0.8,
            },
            model: ModelConfig {
                n_trees: 100,
                seed: 42,
                history_len: 15,
            },
            recommender: RecommenderConfig {
                top_n: 5,
                max_features: 5000,
            },
        }
    }
}
