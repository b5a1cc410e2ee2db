use crate::config::Extraction;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamType {
    Admission,
    Periodic,
    ReturnToWork,
    RoleChange,
    Dismissal,
}

impl ExamType {
    pub fn code(self) -> &'static str {
        match self {
            ExamType::Admission => "ADM",
            ExamType::Periodic => "PER",
            ExamType::ReturnToWork => "RT",
            ExamType::RoleChange => "MF",
            ExamType::Dismissal => "DEM",
        }
    }
}

/// Ordered keyword rules for the exam type. A rule fires when every keyword
/// in its set occurs in the text; the first firing rule wins.
const EXAM_TYPE_RULES: &[(&[&str], ExamType)] = &[
    (&["ADMISSIONAL"], ExamType::Admission),
    (&["PERIODICO"], ExamType::Periodic),
    (&["PERIÓDICO"], ExamType::Periodic),
    (&["RETORNO"], ExamType::ReturnToWork),
    (&["MUDANCA", "FUNCAO"], ExamType::RoleChange),
    (&["DEMISSIONAL"], ExamType::Dismissal),
];

pub fn exam_type(text: &str) -> Option<ExamType> {
    let upper = text.to_uppercase();
    EXAM_TYPE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().all(|k| upper.contains(k)))
        .map(|&(_, ty)| ty)
}

/// The three extracted fields. Each extractor fails independently; any
/// subset may be missing without blocking the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Empty when no start/end trigger pair matched.
    pub employee_name: String,
    /// `None` is the "type undefined" sentinel.
    pub exam_type: Option<ExamType>,
    /// DDMMYYYY; `None` is the "no date" sentinel.
    pub exam_date: Option<String>,
}

impl ExtractionResult {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.employee_name.is_empty() {
            missing.push("name");
        }
        if self.exam_type.is_none() {
            missing.push("type");
        }
        if self.exam_date.is_none() {
            missing.push("date");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Compiled field-extraction rules. Built once per run from config; the
/// name pattern is assembled from the configured trigger lists.
pub struct FieldExtractor {
    name_re: Regex,
    date_re: Regex,
    birth_label: String,
    birth_context_chars: usize,
    max_age_years: i32,
    min_date_offset: usize,
}

impl FieldExtractor {
    pub fn new(rules: &Extraction) -> Result<Self> {
        let starts = rules.name_start_triggers.join("|");
        let ends = rules.name_end_triggers.join("|");
        // The regex crate has no lookahead; consuming the end trigger is
        // equivalent for a single leftmost match.
        let name_pattern = format!(r"(?i)\b(?:{starts})\b[:\s]*(.*?)\s+(?:{ends})");
        let name_re = Regex::new(&name_pattern)
            .with_context(|| format!("compiling name pattern: {name_pattern}"))?;

        // Two-digit day, two-digit month, four-digit year, separated by
        // `/`, `.`, `-` or nothing (covers run-together OCR digit blocks).
        let date_re = Regex::new(r"\b(\d{2})[/.\-]?(\d{2})[/.\-]?(\d{4})\b")
            .with_context(|| "compiling date pattern")?;

        Ok(Self {
            name_re,
            date_re,
            birth_label: rules.birth_label.to_lowercase(),
            birth_context_chars: rules.birth_context_chars,
            max_age_years: rules.max_age_years,
            min_date_offset: rules.min_date_offset,
        })
    }

    pub fn extract(&self, text: &str) -> ExtractionResult {
        ExtractionResult {
            employee_name: self.employee_name(text),
            exam_type: exam_type(text),
            exam_date: self.exam_date(text),
        }
    }

    /// Capture the shortest run between a start trigger and the first end
    /// trigger. The bare-digit and bare-`M` end triggers can truncate
    /// legitimately short names; known heuristic limitation.
    pub fn employee_name(&self, text: &str) -> String {
        let Some(caps) = self.name_re.captures(text) else {
            return String::new();
        };
        let raw = caps.get(1).map(|g| g.as_str()).unwrap_or("");
        let name = raw.trim().to_uppercase();
        match name.strip_prefix("NOME ") {
            Some(rest) => rest.to_string(),
            None => name,
        }
    }

    /// Scan for date-like triples, validate each candidate, and keep the
    /// last survivor in text order (the exam date tends to repeat near the
    /// signature at the end of the document).
    pub fn exam_date(&self, text: &str) -> Option<String> {
        let current_year = OffsetDateTime::now_utc().year();
        let mut selected: Option<String> = None;

        for caps in self.date_re.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let (Some(d), Some(m), Some(y)) = (caps.get(1), caps.get(2), caps.get(3)) else {
                continue;
            };
            let Ok(day) = d.as_str().parse::<u8>() else { continue };
            let Ok(month) = m.as_str().parse::<u8>() else { continue };
            let Ok(year) = y.as_str().parse::<i32>() else { continue };

            if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
                continue;
            }
            let Ok(month_enum) = Month::try_from(month) else { continue };
            if Date::from_calendar_date(year, month_enum, day).is_err() {
                continue;
            }

            // Dates far in the past are birth dates, not exam dates.
            if year < current_year - self.max_age_years {
                continue;
            }

            if self.preceded_by_birth_label(text, whole.start()) {
                continue;
            }

            selected = Some(format!("{day:02}{month:02}{year:04}"));
        }

        let formatted = selected?;

        // A date sitting in the first few characters of the text comes from
        // a degenerate/very short input, not a real exam date field.
        let byte_offset = text.rfind(&formatted)?;
        let char_offset = text[..byte_offset].chars().count();
        if char_offset < self.min_date_offset {
            return None;
        }

        Some(formatted)
    }

    fn preceded_by_birth_label(&self, text: &str, match_start: usize) -> bool {
        let prefix = &text[..match_start];
        let context_start = prefix
            .char_indices()
            .rev()
            .take(self.birth_context_chars)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(prefix.len());
        prefix[context_start..]
            .to_lowercase()
            .contains(&self.birth_label)
    }
}
