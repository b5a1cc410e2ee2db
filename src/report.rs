use serde::{Deserialize, Serialize};

/// End-of-run summary, printed as JSON and optionally written to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub started: String,
    pub finished: String,
    pub scanned: u32,
    pub renamed: u32,
    pub filed_processed: u32,
    pub filed_errors: u32,
    pub skipped_no_text: u32,
    pub skipped_unrecognized: u32,
    pub failed: u32,
    pub files: Vec<FileReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub source: String,
    pub outcome: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub missing: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}
