use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for Mexican postal codes: exactly five digits.
    /// Membership in the municipal catalog is checked separately by the
    /// geofence validator; this only rejects malformed input early.
    /// - Valid: "97357", "97000"
    /// - Invalid: "9735", "973571", "97-357", "ABCDE"
    pub static ref POSTAL_CODE_REGEX: Regex = Regex::new(r"^\d{5}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postal_code_regex_valid() {
        assert!(POSTAL_CODE_REGEX.is_match("97357"));
        assert!(POSTAL_CODE_REGEX.is_match("97000"));
        assert!(POSTAL_CODE_REGEX.is_match("00000"));
    }

    #[test]
    fn test_postal_code_regex_invalid() {
        assert!(!POSTAL_CODE_REGEX.is_match("9735")); // too short
        assert!(!POSTAL_CODE_REGEX.is_match("973571")); // too long
        assert!(!POSTAL_CODE_REGEX.is_match("97-357")); // separator
        assert!(!POSTAL_CODE_REGEX.is_match("ABCDE")); // letters
        assert!(!POSTAL_CODE_REGEX.is_match("")); // empty
        assert!(!POSTAL_CODE_REGEX.is_match(" 97357")); // untrimmed input
    }
}
