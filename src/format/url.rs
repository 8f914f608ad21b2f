//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::picker::PickerResult;

/// URL formatter - outputs a map URL for the picked location
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        result: &PickerResult,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        config.format_url(provider, result.latitude, result.longitude)
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for the picked location"
    }

    fn format(&self, result: &PickerResult, config: &Config) -> Result<String> {
        self.format_with_provider(result, config, None)
    }
}
