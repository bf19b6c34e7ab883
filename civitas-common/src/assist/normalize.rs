//! Whitespace normalization shared by the proofreader

/// Collapse every whitespace run to a single space and trim both ends
///
/// Newlines and tabs count as whitespace. The empty string maps to itself.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_runs_and_trims() {
        assert_eq!(normalize("  a   b\n c "), "a b c");
    }

    #[test]
    fn test_tabs_and_crlf() {
        assert_eq!(normalize("\tflood\r\n\r\nwarning\t"), "flood warning");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_already_normal_is_unchanged() {
        assert_eq!(normalize("Road closed at bridge."), "Road closed at bridge.");
    }
}
