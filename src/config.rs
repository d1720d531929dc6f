//! Run configuration for the extract and render passes.
//!
//! Values are resolved once at startup (CLI flags, falling back to the
//! environment and a `.env` file) and passed explicitly into the core.

use crate::error::{ErdError, Result};
use crate::graph::OutputFormat;
use reqwest::Url;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.baserow.io";
pub const DEFAULT_SCHEMA_FILE: &str = "schema.json";

/// Configuration for `extract`
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub token: String,
    pub database_id: u64,
    pub base_url: Url,
    pub output: PathBuf,
}

impl ExtractConfig {
    /// Validate raw settings.
    ///
    /// A missing or blank token is an authentication failure, everything
    /// else that is malformed is a configuration failure.
    pub fn new(
        token: Option<String>,
        database_id: Option<u64>,
        base_url: &str,
        output: PathBuf,
    ) -> Result<Self> {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ErdError::Auth("BASEROW_API_TOKEN is not set".to_string()))?;

        let database_id = database_id
            .ok_or_else(|| ErdError::Config("DATABASE_ID is not set".to_string()))?;

        Ok(Self {
            token,
            database_id,
            base_url: parse_base_url(base_url)?,
            output,
        })
    }
}

/// Configuration for `render`
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub input: PathBuf,
    /// `None` writes to stdout
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
}

impl RenderConfig {
    /// Resolve the output format from an explicit value or the output extension.
    pub fn new(input: PathBuf, output: Option<PathBuf>, format: Option<&str>) -> Result<Self> {
        let format = match format {
            Some(f) => f.parse().map_err(ErdError::Config)?,
            None => output
                .as_ref()
                .and_then(|p| p.extension())
                .and_then(|e| e.to_str())
                .and_then(OutputFormat::from_extension)
                .unwrap_or_default(),
        };

        Ok(Self {
            input,
            output,
            format,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    // Url::join drops the last path segment unless it ends in '/'
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    let url = Url::parse(&normalized)
        .map_err(|e| ErdError::Config(format!("invalid BASE_URL '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ErdError::Config(format!(
            "BASE_URL must be http or https, got '{raw}'"
        )));
    }

    Ok(url)
}
