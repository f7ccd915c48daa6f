use crate::scoring::DimensionConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

fn default_autosave_interval() -> String {
    "30s".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Rating dimensions, scale, grouping, and threshold
    #[serde(default)]
    pub dimensions: DimensionConfig,

    /// Where use-case data lives (defaults to the config directory)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// How often a dirty form is snapshotted, as a humantime string
    #[serde(default = "default_autosave_interval")]
    pub autosave_interval: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimensions: DimensionConfig::default(),
            data_dir: None,
            autosave_interval: default_autosave_interval(),
        }
    }
}

impl Config {
    /// Parsed autosave interval.
    pub fn autosave_duration(&self) -> Result<Duration> {
        humantime::parse_duration(&self.autosave_interval).with_context(|| {
            format!(
                "Invalid autosave_interval '{}' (expected e.g. \"30s\", \"2m\")",
                self.autosave_interval
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.autosave_interval, "30s");
        assert!(config.data_dir.is_none());
        assert_eq!(config.dimensions.threshold(), 2.5);
    }

    #[test]
    fn test_autosave_duration_parses() {
        let config = Config::default();
        assert_eq!(config.autosave_duration().unwrap(), Duration::from_secs(30));

        let config = Config {
            autosave_interval: "2m".to_string(),
            ..Default::default()
        };
        assert_eq!(config.autosave_duration().unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn test_invalid_autosave_interval_is_an_error() {
        let config = Config {
            autosave_interval: "soon".to_string(),
            ..Default::default()
        };
        assert!(config.autosave_duration().is_err());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config.autosave_interval, "30s");
        assert_eq!(config.dimensions.value.len(), 4);
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r#"
autosave_interval: 1m
dimensions:
  scale: { min: 1, max: 10 }
  value: [impact]
  feasibility: [readiness]
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.autosave_interval, "1m");
        assert_eq!(config.dimensions.scale.max, 10.0);
        assert_eq!(config.dimensions.threshold(), 5.5);
    }
}
