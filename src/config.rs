//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then the TOML config file, then
//! environment variables, then command-line flags. [`Config::validate`] runs
//! once all layers are applied.
//!
//! Species manifests describe batches of uploads for the `validate`
//! command; their relative paths resolve against the manifest's directory.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    APP_CONFIG_DIR, CONFIG_FILE_NAME, DEFAULT_LOG_LEVEL, ENV_LOG_LEVEL, ENV_WORKERS, MAX_WORKERS,
};
use crate::error::{IngestError, Result};
use crate::export::{CompressionAlgorithm, ExportFormat};
use crate::ingest::SpeciesJob;
use crate::models::IngestionConfig;

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of error, warn, info, debug, trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Concurrency and progress settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of files or species decoded concurrently
    pub workers: usize,

    /// Show progress bars for batch commands
    pub show_progress: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            show_progress: true,
        }
    }
}

/// Defaults for catalog export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub compression: CompressionAlgorithm,
}

/// Global configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub processing: ProcessingConfig,
    pub export: ExportConfig,
}

impl Config {
    /// `<config dir>/spectro-ingest/config.toml`, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
        toml::from_str(&text).map_err(|e| {
            IngestError::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Load the file layer
    ///
    /// An explicitly given file must exist. The default location is optional
    /// and silently skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(IngestError::configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                debug!("Loading config from {}", path.display());
                Self::from_file(path)
            }
            None => match Self::default_path().filter(|path| path.exists()) {
                Some(path) => {
                    debug!("Loading config from {}", path.display());
                    Self::from_file(&path)
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// Apply environment variable overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(workers) = lookup(ENV_WORKERS) {
            self.processing.workers = workers.trim().parse().map_err(|_| {
                IngestError::configuration(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_WORKERS, workers
                ))
            })?;
            debug!("{} override: {}", ENV_WORKERS, self.processing.workers);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level.trim().to_ascii_lowercase();
            debug!("{} override: {}", ENV_LOG_LEVEL, self.logging.level);
        }

        Ok(())
    }

    /// Override the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.processing.workers = workers;
        self
    }

    /// Override the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Disable progress bars
    pub fn without_progress(mut self) -> Self {
        self.processing.show_progress = false;
        self
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.processing.workers == 0 {
            return Err(IngestError::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if self.processing.workers > MAX_WORKERS {
            return Err(IngestError::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_WORKERS
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(IngestError::configuration(format!(
                "Unknown log level '{}'. Expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

/// One species in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub name: String,
    pub qpart: PathBuf,
    #[serde(default)]
    pub int: Option<PathBuf>,
    #[serde(default)]
    pub var: Option<PathBuf>,
    #[serde(default)]
    pub cat: Option<PathBuf>,
    /// Comma-separated quantum number labels, e.g. "N, Ka, Kc, v"
    #[serde(default)]
    pub labels: Option<String>,
    #[serde(default)]
    pub rovibrational: bool,
    #[serde(default)]
    pub vib_label: Option<String>,
}

impl SpeciesEntry {
    fn resolve_paths(&mut self, base_dir: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        };
        resolve(&mut self.qpart);
        for path in [&mut self.int, &mut self.var, &mut self.cat].into_iter().flatten() {
            resolve(path);
        }
    }

    /// Ingestion hints for the catalog, if labels were given
    pub fn ingestion_config(&self) -> Option<IngestionConfig> {
        self.labels.as_deref().map(|labels| {
            IngestionConfig::from_label_str(labels, self.rovibrational, self.vib_label.as_deref())
        })
    }

    pub fn into_job(self) -> SpeciesJob {
        let config = self.ingestion_config();
        SpeciesJob {
            name: self.name,
            qpart: self.qpart,
            int: self.int,
            var: self.var,
            cat: self.cat,
            config,
        }
    }
}

/// Batch of species uploads, read from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesManifest {
    #[serde(default)]
    pub species: Vec<SpeciesEntry>,
}

impl SpeciesManifest {
    /// Parse manifest text, resolving relative paths against `base_dir`
    pub fn from_toml_str(text: &str, base_dir: &Path) -> Result<Self> {
        let mut manifest: Self = toml::from_str(text)
            .map_err(|e| IngestError::configuration(format!("Invalid species manifest: {}", e)))?;

        for entry in &mut manifest.species {
            entry.resolve_paths(base_dir);
        }
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let manifest = Self::from_toml_str(&text, base_dir)?;
        debug!(
            "Loaded manifest {} with {} species",
            path.display(),
            manifest.species.len()
        );
        Ok(manifest)
    }

    /// Check the manifest is non-empty with unique species names
    pub fn validate(&self) -> Result<()> {
        if self.species.is_empty() {
            return Err(IngestError::configuration(
                "Species manifest lists no [[species]] entries",
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.species {
            if entry.name.trim().is_empty() {
                return Err(IngestError::configuration("Species name cannot be empty"));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(IngestError::configuration(format!(
                    "Species '{}' appears more than once in the manifest",
                    entry.name
                )));
            }
        }

        Ok(())
    }

    pub fn into_jobs(self) -> Vec<SpeciesJob> {
        self.species.into_iter().map(SpeciesEntry::into_job).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.logging.level, "warn");
        assert!(config.processing.workers >= 1);
        assert_eq!(config.export.format, ExportFormat::Parquet);
        assert_eq!(config.export.compression, CompressionAlgorithm::Snappy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[processing]\nworkers = 3\n\n[export]\nformat = \"csv\"\ncompression = \"zstd\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.processing.workers, 3);
        assert!(config.processing.show_progress);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.export.format, ExportFormat::Csv);
        assert_eq!(config.export.compression, CompressionAlgorithm::Zstd);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Config::load(Some(Path::new("/nonexistent/spectro.toml")));
        assert!(matches!(result, Err(IngestError::Configuration { .. })));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[processing\nworkers = ").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(IngestError::Configuration { .. })
        ));
    }

    #[test]
    fn test_layering_order() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_WORKERS, "6"), (ENV_LOG_LEVEL, " DEBUG ")]);

        let mut config = Config::default().with_workers(2);
        config
            .apply_env_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.processing.workers, 6);
        assert_eq!(config.logging.level, "debug");

        // flags are applied last
        let config = config.with_workers(1).with_log_level("trace");
        assert_eq!(config.processing.workers, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_env_workers() {
        let mut config = Config::default();
        let result = config.apply_env_from(|key| (key == ENV_WORKERS).then(|| "many".to_string()));
        assert!(matches!(result, Err(IngestError::Configuration { .. })));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(Config::default().with_workers(0).validate().is_err());
        assert!(Config::default().with_workers(MAX_WORKERS + 1).validate().is_err());
        assert!(Config::default().with_log_level("loud").validate().is_err());
    }

    const MANIFEST: &str = r#"
[[species]]
name = "H2CO"
qpart = "h2co/h2co.qpart"
int = "h2co/h2co.int"
cat = "/data/h2co.cat"
labels = "N, Ka, Kc, v"
rovibrational = true
vib_label = "v"

[[species]]
name = "HCN"
qpart = "hcn.qpart"
"#;

    #[test]
    fn test_manifest_resolves_relative_paths() {
        let manifest = SpeciesManifest::from_toml_str(MANIFEST, Path::new("/uploads")).unwrap();

        let h2co = &manifest.species[0];
        assert_eq!(h2co.qpart, PathBuf::from("/uploads/h2co/h2co.qpart"));
        assert_eq!(h2co.int, Some(PathBuf::from("/uploads/h2co/h2co.int")));
        assert_eq!(h2co.var, None);
        assert_eq!(h2co.cat, Some(PathBuf::from("/data/h2co.cat")));

        let hcn = &manifest.species[1];
        assert!(!hcn.rovibrational);
        assert_eq!(hcn.labels, None);
    }

    #[test]
    fn test_manifest_into_jobs() {
        let jobs = SpeciesManifest::from_toml_str(MANIFEST, Path::new("/uploads"))
            .unwrap()
            .into_jobs();

        assert_eq!(jobs.len(), 2);
        let config = jobs[0].config.as_ref().unwrap();
        assert_eq!(config.labels(), &["N", "Ka", "Kc", "v"]);
        assert!(config.rovibrational());
        assert_eq!(config.vibrational_label(), Some("v"));
        assert!(jobs[1].config.is_none());
    }

    #[test]
    fn test_manifest_rejects_duplicates_and_empty() {
        let duplicate = "[[species]]\nname = \"A\"\nqpart = \"a.qpart\"\n\n[[species]]\nname = \"A\"\nqpart = \"b.qpart\"\n";
        assert!(SpeciesManifest::from_toml_str(duplicate, Path::new(".")).is_err());
        assert!(SpeciesManifest::from_toml_str("", Path::new(".")).is_err());
    }

    #[test]
    fn test_manifest_load_uses_file_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("species.toml");
        std::fs::write(&path, "[[species]]\nname = \"HCN\"\nqpart = \"hcn.qpart\"\n").unwrap();

        let manifest = SpeciesManifest::load(&path).unwrap();
        assert_eq!(manifest.species[0].qpart, temp_dir.path().join("hcn.qpart"));
    }
}
