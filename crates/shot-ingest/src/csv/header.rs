//! CSV header normalization.

/// Normalizes a header value: strips a byte-order mark and surrounding whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Returns true if no header cell carries a name.
pub fn is_blank_header(headers: &[String]) -> bool {
    headers.iter().all(String::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Club Type  "), "Club Type");
        assert_eq!(normalize_header("\u{feff}Date"), "Date");
        assert_eq!(normalize_header("Carry"), "Carry");
    }

    #[test]
    fn test_is_blank_header() {
        assert!(is_blank_header(&[String::new(), String::new()]));
        assert!(is_blank_header(&[]));
        assert!(!is_blank_header(&["A".to_string(), String::new()]));
    }
}
