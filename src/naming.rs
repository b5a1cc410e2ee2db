use crate::config::Naming;
use crate::extract::ExtractionResult;

/// Compose the canonical filename for a document from its page count and
/// extracted fields. Missing fields take their sentinel placeholders; a
/// missing name stays an empty segment.
pub fn compose_file_name(rules: &Naming, page_count: u32, fields: &ExtractionResult) -> String {
    let prefix = if page_count > rules.record_page_threshold {
        &rules.record_prefix
    } else {
        &rules.certificate_prefix
    };

    let type_code = fields
        .exam_type
        .map(|ty| ty.code().to_string())
        .unwrap_or_else(|| rules.type_placeholder.clone());
    let date = fields
        .exam_date
        .clone()
        .unwrap_or_else(|| rules.date_placeholder.clone());

    sanitize_file_name(&format!(
        "{prefix} - {} {type_code} {date}.pdf",
        fields.employee_name
    ))
}

/// Replace characters illegal in filesystem names with underscores.
pub fn sanitize_file_name(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if (c as u32) < 0x20 => '_',
            c => c,
        })
        .collect()
}
