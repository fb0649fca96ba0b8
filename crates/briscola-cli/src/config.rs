use briscola_bot::{RunnerConfig, SearchConfig};
use briscola_core::calling::PartnerScan;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Optional YAML configuration; every section may be left out.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub calling: CallingSection,
    #[serde(default)]
    pub deal: DealSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: AppConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.search.validate()?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }

    /// Search settings: file values over `BRISCOLA_SEARCH_*` variables over
    /// built-in defaults.
    pub fn search_config(&self) -> SearchConfig {
        let base = SearchConfig::from_env();
        SearchConfig::new(
            self.search.depth.unwrap_or(base.depth),
            self.search.parallel.unwrap_or(base.parallel),
        )
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            search: self.search_config(),
            partner_scan: self.calling.partner_scan,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SearchSection {
    pub depth: Option<u32>,
    pub parallel: Option<bool>,
}

impl SearchSection {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.depth == Some(0) {
            return Err(ValidationError::InvalidField {
                field: "search.depth".to_string(),
                message: "depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CallingSection {
    #[serde(default)]
    pub partner_scan: PartnerScan,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DealSection {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    /// Structured JSON log written alongside the console output.
    #[serde(default)]
    pub json_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            json_file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self
            .json_file
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            self.json_file = None;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL_YAML: &str = r#"
search:
  depth: 3
  parallel: false
calling:
  partner_scan: skip_caller
deal:
  seed: 77
logging:
  tracing_level: "DEBUG"
  json_file: "logs/briscola.jsonl"
"#;

    #[test]
    fn loads_every_section() {
        let mut cfg: AppConfig = serde_yaml::from_str(FULL_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.search_config(), SearchConfig::new(3, false));
        assert_eq!(cfg.calling.partner_scan, PartnerScan::SkipCaller);
        assert_eq!(cfg.deal.seed, Some(77));
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(
            cfg.logging.json_file,
            Some(PathBuf::from("logs/briscola.jsonl"))
        );
        assert_eq!(cfg.runner_config().partner_scan, PartnerScan::SkipCaller);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: AppConfig = serde_yaml::from_str("{}").expect("parse");
        cfg.validate().expect("validate");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.calling.partner_scan, PartnerScan::FirstHolder);
        assert_eq!(cfg.logging.level(), Some(Level::WARN));
    }

    #[test]
    fn rejects_zero_depth() {
        let yaml = FULL_YAML.replace("depth: 3", "depth: 0");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "search.depth"
        ));
    }

    #[test]
    fn rejects_unknown_level() {
        let yaml = FULL_YAML.replace("\"DEBUG\"", "\"loud\"");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "logging.tracing_level"
        ));
    }

    #[test]
    fn unknown_scan_mode_fails_to_parse() {
        let yaml = FULL_YAML.replace("skip_caller", "everybody");
        assert!(serde_yaml::from_str::<AppConfig>(&yaml).is_err());
    }

    #[test]
    fn from_path_reports_the_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("briscola.yaml");
        let mut file = File::create(&path).expect("create");
        file.write_all(FULL_YAML.as_bytes()).expect("write");

        let cfg = AppConfig::from_path(&path).expect("load");
        assert_eq!(cfg.deal.seed, Some(77));

        let missing = dir.path().join("missing.yaml");
        let err = AppConfig::from_path(&missing).expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.path(), missing.as_path());
    }

    #[test]
    fn from_path_rejects_invalid_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "search:\n  depth: 0\n").expect("write");
        let err = AppConfig::from_path(&path).expect_err("invalid");
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
