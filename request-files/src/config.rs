//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The file path
//! defaults to `config.yaml` and can be set with `-f` or the `REQUEST_FILES_CONFIG` environment
//! variable. A missing file is not an error: every field has a default.
//!
//! ## Loading Priority
//!
//! 1. **YAML config file** - Base configuration
//! 2. **Environment variables** - Variables prefixed with `REQUEST_FILES_` override YAML values
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! REQUEST_FILES_PORT=8080
//! REQUEST_FILES_MAX_UPLOAD_SIZE=1048576
//! ```
//!
//! Set `docs_url: null` or `openapi_url: null` in the YAML file to disable those routes.

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::openapi::compat::is_known_path;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "REQUEST_FILES_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// `info.title` of the OpenAPI document
    pub title: String,
    /// `info.version` of the OpenAPI document
    pub version: String,
    /// Route serving the OpenAPI document, `None` disables it
    pub openapi_url: Option<String>,
    /// Route serving the interactive docs, `None` disables them
    pub docs_url: Option<String>,
    /// Maximum request body size in bytes for the upload routes
    pub max_upload_size: usize,
    /// Enable OpenTelemetry OTLP export for distributed tracing
    pub enable_otel_export: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            title: "Fast API".to_string(),
            version: "0.1.0".to_string(),
            openapi_url: Some("/openapi.json".to_string()),
            docs_url: Some("/docs".to_string()),
            max_upload_size: 10 * 1024 * 1024,
            enable_otel_export: false,
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("REQUEST_FILES_").split("__"))
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_upload_size == 0 {
            anyhow::bail!("Config validation: max_upload_size must be greater than zero");
        }

        for (key, url) in [("openapi_url", &self.openapi_url), ("docs_url", &self.docs_url)] {
            let Some(url) = url else { continue };
            if !url.starts_with('/') {
                anyhow::bail!("Config validation: {key} must start with '/', got '{url}'");
            }
            if is_known_path(url) {
                anyhow::bail!("Config validation: {key} '{url}' collides with an upload route");
            }
        }

        if let (Some(openapi), Some(docs)) = (&self.openapi_url, &self.docs_url)
            && openapi == docs
        {
            anyhow::bail!("Config validation: openapi_url and docs_url must differ");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
