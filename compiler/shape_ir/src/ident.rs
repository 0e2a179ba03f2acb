//! Identifier classification for property keys and binding names.

/// Whether `s` is a bare identifier: `[A-Za-z_$][0-9A-Za-z_$]*`.
///
/// Reserved words are not excluded; they are valid property keys.
pub fn is_identifier(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' || first == b'$' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
        }
        _ => false,
    }
}

/// Parse a canonical array index (`"0"`, `"17"`; no sign, no leading zeros).
pub fn array_index(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("x"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("$NUMBER$"));
        assert!(is_identifier("obj_12"));
        assert!(is_identifier("length"));
    }

    #[test]
    fn non_identifiers() {
        assert!(!is_identifier(""));
        assert!(!is_identifier("0"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("foo-bar"));
        assert!(!is_identifier("a b"));
        assert!(!is_identifier("*"));
    }

    #[test]
    fn indices() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("42"), Some(42));
        assert_eq!(array_index(""), None);
        assert_eq!(array_index("01"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("1.5"), None);
        assert_eq!(array_index("length"), None);
        assert_eq!(array_index("99999999999"), None);
    }
}
