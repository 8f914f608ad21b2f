//! Output formatters
//!
//! Trait-based formatting of a confirmed pick for the CLI.

pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::picker::PickerResult;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format the confirmed pick
    ///
    /// # Arguments
    /// * `result` - The confirmed picker result
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, result: &PickerResult, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable text".to_string(),
        },
        FormatInfo {
            name: "json".to_string(),
            description: "Full JSON result".to_string(),
        },
        FormatInfo {
            name: "url".to_string(),
            description: "Map URL for the picked location".to_string(),
        },
    ]
}
