//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::picker::PickerResult;

/// JSON formatter - outputs the full result as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON result"
    }

    fn format(&self, result: &PickerResult, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format_roundtrip() {
        let result = PickerResult {
            latitude: 51.5034,
            longitude: -0.1276,
            addresses: None,
        };

        let output = JsonFormatter.format(&result, &Config::default()).unwrap();
        let parsed: PickerResult = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed, result);
    }

    #[test]
    fn test_json_formatter_info() {
        assert_eq!(JsonFormatter.name(), "json");
        assert!(!JsonFormatter.description().is_empty());
    }
}
