/// Returns `true` for characters that may appear in a callsign: ASCII alphanumerics and `/`.
pub fn is_callsign_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '/'
}

/// Trims surrounding whitespace and uppercases a callsign for querying.
pub fn normalize_callsign(callsign: &str) -> String {
    callsign.trim().to_ascii_uppercase()
}
