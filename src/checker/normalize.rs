/// Strip leading and trailing bytes that are not ASCII alphanumeric.
///
/// Interior characters, including hyphens and apostrophes, are kept as-is.
/// A token with no alphanumeric character at all yields the empty word.
pub fn normalize(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_ascii_alphanumeric())
}
