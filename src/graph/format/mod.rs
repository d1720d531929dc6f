//! Output notations for ERD rendering.

mod dbml;
mod mermaid;

pub use dbml::to_dbml;
pub use mermaid::{to_mermaid, MANY_TO_ONE};

use crate::graph::view::ErdView;
use std::fmt;
use std::str::FromStr;

/// Diagram notation to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Mermaid erDiagram
    #[default]
    Mermaid,
    /// DBML (dbdiagram.io)
    Dbml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            "dbml" | "dbdiagram" => Ok(OutputFormat::Dbml),
            _ => Err(format!(
                "Unknown format: {}. Valid options: mermaid, dbml",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Mermaid => write!(f, "mermaid"),
            OutputFormat::Dbml => write!(f, "dbml"),
        }
    }
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mermaid => "mmd",
            OutputFormat::Dbml => "dbml",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mmd" | "mermaid" => Some(OutputFormat::Mermaid),
            "dbml" => Some(OutputFormat::Dbml),
            _ => None,
        }
    }

    pub fn render(&self, view: &ErdView) -> String {
        match self {
            OutputFormat::Mermaid => to_mermaid(view),
            OutputFormat::Dbml => to_dbml(view),
        }
    }
}
