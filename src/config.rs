//! Configuration for the validator CLI
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (schema-validate.toml)
//! - Environment variables (SCHEMA_VALIDATE__*)
//!
//! ## Example config file (schema-validate.toml):
//! ```toml
//! [output]
//! format = "json"
//! max_reported = 50
//!
//! [schema]
//! descriptor = true
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Report settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Schema document settings
    #[serde(default)]
    pub schema: SchemaDocConfig,
}

/// Report configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Print at most this many diagnostics; the exit code still reflects all of them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_reported: Option<usize>,
}

/// How diagnostics are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `schema validation error: <path>: <message>` lines on stderr
    #[default]
    Text,
    /// One JSON report on stdout
    Json,
}

/// Schema document configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocConfig {
    /// Treat the schema file as a descriptor wrapping the real schema
    #[serde(default)]
    pub descriptor: bool,
}

impl ValidatorConfig {
    /// Load configuration, adding an explicit file that must exist
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "schema-validate.toml",
            ".schema-validate.toml",
            "config/schema-validate.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(dirs) = directories::ProjectDirs::from("dev", "familiar", "schema-validate") {
            let user_config = dirs.config_dir().join("schema-validate.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // SCHEMA_VALIDATE__OUTPUT__FORMAT=json
        builder = builder.add_source(
            Environment::with_prefix("SCHEMA_VALIDATE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
