//! Short-address derivation
//!
//! A full formatted address line is too long for the compact panel row, so a
//! short form is cut out of its comma-separated segments.

/// Derive a short display address from a full formatted address line
///
/// Segments are split on `,` and trimmed. With three or more segments the
/// second and third are joined with a comma (locality and region for most
/// formats); with exactly two the second is taken; otherwise the line is
/// returned as-is.
pub fn shorten_address(full: &str) -> String {
    let segments: Vec<&str> = full.split(',').map(str::trim).collect();
    match segments.len() {
        2 => segments[1].to_string(),
        n if n >= 3 => format!("{},{}", segments[1], segments[2]),
        _ => segments[0].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_segments() {
        assert_eq!(
            shorten_address("123 Main St, Springfield, IL, USA"),
            "Springfield,IL"
        );
    }

    #[test]
    fn test_three_segments() {
        assert_eq!(shorten_address("Main St, Springfield, IL"), "Springfield,IL");
    }

    #[test]
    fn test_two_segments() {
        assert_eq!(shorten_address("Springfield, IL"), "IL");
    }

    #[test]
    fn test_single_segment() {
        assert_eq!(shorten_address("Springfield"), "Springfield");
    }

    #[test]
    fn test_empty() {
        assert_eq!(shorten_address(""), "");
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            shorten_address("  10 Downing Street ,  Westminster , London , UK"),
            "Westminster,London"
        );
    }
}
