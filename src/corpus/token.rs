//! Token normalization shared by vocabulary counting and corpus writing.

/// Replacement for tokens that read as numbers
pub const NUMBER_TOKEN: &str = "NUMBER";

/// Replacement for out-of-vocabulary tokens
pub const UNKNOWN_TOKEN: &str = "UNK";

/// Normalizes a single whitespace-free token.
///
/// * Tokens made of ASCII punctuation only are dropped (`None`).
/// * Commas are removed; if the rest parses as a float the token becomes
///   [NUMBER_TOKEN].
/// * Otherwise hyphens are removed as well.
///
/// # Example
/// ```
/// use rstdep::corpus::normalize_token;
///
/// assert_eq!(normalize_token("..."), None);
/// assert_eq!(normalize_token("1,000.5").as_deref(), Some("NUMBER"));
/// assert_eq!(normalize_token("well-known").as_deref(), Some("wellknown"));
/// ```
pub fn normalize_token(token: &str) -> Option<String> {
    if token.chars().all(|c| c.is_ascii_punctuation()) {
        return None;
    }

    let token = token.replace(',', "");
    if token.parse::<f64>().is_ok() {
        return Some(NUMBER_TOKEN.to_string());
    }
    Some(token.replace('-', ""))
}

/// Splits `text` on whitespace and normalizes every token, dropping punctuation.
pub fn normalize_text(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().filter_map(normalize_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token(","), None);
        assert_eq!(normalize_token("--"), None);
        assert_eq!(normalize_token("-3.5").as_deref(), Some(NUMBER_TOKEN));
        assert_eq!(normalize_token("1e3").as_deref(), Some(NUMBER_TOKEN));
        assert_eq!(normalize_token("e-mail").as_deref(), Some("email"));
        assert_eq!(normalize_token("a,b").as_deref(), Some("ab"));
        assert_eq!(normalize_token("n't").as_deref(), Some("n't"));
    }

    #[test]
    fn test_normalize_text() {
        let tokens: Vec<String> = normalize_text("the 2 ice-cream , was great !").collect();
        assert_eq!(tokens, vec!["the", "NUMBER", "icecream", "was", "great"]);
    }
}
