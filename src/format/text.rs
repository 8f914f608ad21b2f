//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::picker::address::shorten_address;
use crate::picker::PickerResult;

/// Text formatter - outputs a human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, result: &PickerResult, _config: &Config) -> Result<String> {
        let mut output = String::new();

        output.push_str("Picked location\n");
        output.push_str(&format!(
            "  Coordinates: ({:.6}, {:.6})\n",
            result.latitude, result.longitude
        ));

        match result.addresses.as_ref().and_then(|a| a.first()) {
            Some(best) => {
                output.push_str(&format!("  Address: {}\n", best.display_name));
                output.push_str(&format!(
                    "  Short: {}\n",
                    shorten_address(&best.display_name)
                ));
            }
            None => output.push_str("  Address: (none)\n"),
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::geo::Address;

    fn result_with_address() -> PickerResult {
        PickerResult {
            latitude: 39.7817,
            longitude: -89.6501,
            addresses: Some(vec![Address {
                display_name: "123 Main St, Springfield, IL, USA".to_string(),
                coords: Coordinates::new(39.7817, -89.6501),
                details: None,
            }]),
        }
    }

    #[test]
    fn test_text_format() {
        let output = TextFormatter
            .format(&result_with_address(), &Config::default())
            .unwrap();

        assert!(output.contains("Picked location"));
        assert!(output.contains("(39.781700, -89.650100)"));
        assert!(output.contains("123 Main St, Springfield, IL, USA"));
        assert!(output.contains("Short: Springfield,IL"));
    }

    #[test]
    fn test_text_format_no_address() {
        let result = PickerResult {
            latitude: 0.0,
            longitude: 0.0,
            addresses: None,
        };
        let output = TextFormatter.format(&result, &Config::default()).unwrap();
        assert!(output.contains("Address: (none)"));
    }

    #[test]
    fn test_text_formatter_info() {
        assert_eq!(TextFormatter.name(), "text");
        assert!(!TextFormatter.description().is_empty());
    }
}
