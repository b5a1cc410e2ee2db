use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: Global,
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub acquisition: Acquisition,
    #[serde(default)]
    pub ocr: Ocr,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub extraction: Extraction,
    #[serde(default)]
    pub naming: Naming,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// Load the given config file, or `./aso-filer.toml` if present,
    /// or compiled-in defaults.
    pub fn load_or_default(user: Option<&Path>) -> Result<Self> {
        if let Some(p) = user {
            return Self::load(p);
        }
        let default = Path::new("aso-filer.toml");
        if default.exists() {
            Self::load(default)
        } else {
            Ok(Self::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global: Default::default(),
            paths: Default::default(),
            acquisition: Default::default(),
            ocr: Default::default(),
            classification: Default::default(),
            extraction: Default::default(),
            naming: Default::default(),
            logging: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Global {
    pub print_summary: bool,
    pub write_report_json: bool,
    pub report_filename: String,
}
impl Default for Global {
    fn default() -> Self {
        Self {
            print_summary: true,
            write_report_json: false,
            report_filename: "aso-filer-report.json".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    pub input_dir: String,
    pub processed_subdir: String,
    pub errors_subdir: String,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            input_dir: ".".into(),
            processed_subdir: "PROCESSED".into(),
            errors_subdir: "ERRORS".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acquisition {
    /// Native first-page text shorter than this is treated as unavailable.
    pub min_native_chars: usize,
    /// OCR stops scanning further pages/images once the accumulated text
    /// exceeds this many characters. Cost control; can truncate legitimate
    /// later-page text.
    pub ocr_char_budget: usize,
}
impl Default for Acquisition {
    fn default() -> Self {
        Self {
            min_native_chars: 10,
            ocr_char_budget: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ocr {
    pub tessdata_dir: String,
    pub language: String,
}
impl Default for Ocr {
    fn default() -> Self {
        Self {
            tessdata_dir: "tessdata".into(),
            language: "por".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Strong identifier phrases; a match anywhere marks the document valid.
    pub identifiers: Vec<String>,
    /// Narrower sub-kind identifiers, only accepted when the match starts
    /// within `header_window` characters of the document text.
    pub header_identifiers: Vec<String>,
    pub header_window: usize,
}
impl Default for Classification {
    fn default() -> Self {
        Self {
            identifiers: vec![
                "ASO".into(),
                "ATESTADO DE SAÚDE OCUPACIONAL".into(),
                "ATESTADO DE SAUDE OCUPACIONAL".into(),
            ],
            header_identifiers: vec!["Ocupacional".into()],
            header_window: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    /// Words that indicate the employee name follows.
    pub name_start_triggers: Vec<String>,
    /// Words/patterns that indicate the name has ended. Entries are regex
    /// fragments, so `M\s` and `\d` are valid end markers.
    pub name_end_triggers: Vec<String>,
    /// Label marking a date as a birth date.
    pub birth_label: String,
    /// How many characters before a date match are searched for `birth_label`.
    pub birth_context_chars: usize,
    /// Dates more than this many years before the current year are treated
    /// as birth dates, not exam dates.
    pub max_age_years: i32,
    /// A selected date whose last occurrence sits before this offset in the
    /// text is discarded as a degenerate-input false positive.
    pub min_date_offset: usize,
}
impl Default for Extraction {
    fn default() -> Self {
        Self {
            name_start_triggers: vec![
                "EMPREGADO".into(),
                "FUNCIONÁRIO".into(),
                "FUNCIONARIO".into(),
                "NOME".into(),
                "COLABORADOR".into(),
                "TRABALHADOR NOME".into(),
                "PACIENTE".into(),
            ],
            name_end_triggers: vec![
                "DEPTOSETOR".into(),
                "SEXO".into(),
                "SEQUENCIAL".into(),
                "DEPTO".into(),
                "SETOR".into(),
                "CARGO".into(),
                "CPF".into(),
                "RG".into(),
                "CNPJ".into(),
                "DATA".into(),
                "NASC".into(),
                "IDADE".into(),
                r"M\s".into(),
                r"\d".into(),
                "CBO".into(),
                "CÓDIGO".into(),
                "CODIGO".into(),
            ],
            birth_label: "nasc".into(),
            birth_context_chars: 20,
            max_age_years: 5,
            min_date_offset: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Naming {
    pub certificate_prefix: String,
    pub record_prefix: String,
    /// Documents with more pages than this are assumed to be full medical
    /// records rather than single certificates.
    pub record_page_threshold: u32,
    pub type_placeholder: String,
    pub date_placeholder: String,
}
impl Default for Naming {
    fn default() -> Self {
        Self {
            certificate_prefix: "ASO DIGITALIZADO".into(),
            record_prefix: "PRONTUARIO DIGITALIZADO".into(),
            record_page_threshold: 3,
            type_placeholder: "TYPE-UNDEFINED".into(),
            date_placeholder: "NO-DATE".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
