use crate::config::Classification;

/// Decide whether normalized document text is a recognized certificate.
///
/// Strong identifiers match anywhere. Header identifiers are narrower and
/// only count when they occur near the very start of the text, where observed
/// layouts put the document title; a mention further in is incidental.
pub fn is_certificate(rules: &Classification, text: &str) -> bool {
    let upper = text.to_uppercase();

    if rules
        .identifiers
        .iter()
        .any(|id| upper.contains(&id.to_uppercase()))
    {
        return true;
    }

    rules.header_identifiers.iter().any(|id| {
        match upper.find(&id.to_uppercase()) {
            Some(byte_offset) => {
                let char_offset = upper[..byte_offset].chars().count();
                char_offset <= rules.header_window
            }
            None => false,
        }
    })
}
