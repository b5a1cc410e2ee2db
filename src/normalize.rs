use unicode_normalization::UnicodeNormalization;

/// What an empty or whitespace-only document normalizes to, so downstream
/// matching never sees an ambiguous empty string.
pub const EMPTY_PLACEHOLDER: &str = "EMPTY";

/// Collapse extracted PDF/OCR text into a single-line token stream.
///
/// Whitespace runs become single spaces, punctuation is stripped from each
/// token, and tokens that are shorter than two characters after stripping are
/// dropped as OCR noise. Idempotent: normalizing an already-normalized string
/// returns it unchanged.
pub fn normalize(text: &str) -> String {
    if text.trim().is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    let folded: String = text.nfkc().collect();

    let tokens: Vec<String> = folded
        .split_whitespace()
        .map(|t| t.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|t| t.chars().count() > 1)
        .collect();

    if tokens.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    tokens.join(" ")
}
