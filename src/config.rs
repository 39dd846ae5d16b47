//! Configuration management for text baselines

use crate::error::{Result, TextBaselinesError};
use crate::output::metrics::Average;
use crate::processing::regex_classifier::Label;
use crate::processing::text_processor::OutputType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub preprocessing: PreprocessingConfig,
    pub classifier: ClassifierConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessingConfig {
    pub remove_stopwords: bool,
    /// One stopword per line; the built-in English list is used when unset.
    pub stopwords_file: Option<PathBuf>,
    pub output_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub positive_pattern: String,
    pub negative_pattern: Option<String>,
    pub match_label: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub average: String,
    pub plot_path: PathBuf,
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preprocessing: PreprocessingConfig {
                remove_stopwords: true,
                stopwords_file: None,
                output_type: "list".to_string(),
            },
            classifier: ClassifierConfig {
                positive_pattern: r"(?i)\b(great|excellent|amazing|wonderful|loved?|best|brilliant)\b"
                    .to_string(),
                negative_pattern: Some(
                    r"(?i)\b(bad|awful|terrible|boring|worst|waste|poor|hated?)\b".to_string(),
                ),
                match_label: 1,
            },
            metrics: MetricsConfig {
                average: "macro".to_string(),
                plot_path: PathBuf::from("metrics.svg"),
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location (creating it if missing)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    Ok(config)
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            TextBaselinesError::Configuration(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            TextBaselinesError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("text-baselines")
            .join("config.toml")
    }

    /// Check that the string-typed options name known values.
    pub fn validate(&self) -> Result<()> {
        let wrap = |e: TextBaselinesError| TextBaselinesError::Configuration(e.to_string());
        self.output_type().map_err(wrap)?;
        self.average().map_err(wrap)?;
        self.match_label().map_err(wrap)?;
        Ok(())
    }

    pub fn output_type(&self) -> Result<OutputType> {
        self.preprocessing.output_type.parse()
    }

    pub fn average(&self) -> Result<Average> {
        self.metrics.average.parse()
    }

    pub fn match_label(&self) -> Result<Label> {
        Label::try_from(self.classifier.match_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::default().save_to(&path).unwrap();
        let loaded = Config::load(Some(&path)).unwrap();

        assert!(loaded.preprocessing.remove_stopwords);
        assert_eq!(loaded.metrics.average, "macro");
        assert_eq!(loaded.match_label().unwrap(), Label::Positive);
    }

    #[test]
    fn test_unknown_average_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.metrics.average = "harmonic".to_string();
        config.save_to(&path).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, TextBaselinesError::Configuration(_)));
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "preprocessing = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, TextBaselinesError::Configuration(_)));
    }
}
