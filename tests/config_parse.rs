use aso_filer::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../aso-filer.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.ocr.language, "por");
    assert_eq!(cfg.naming.record_page_threshold, 3);
    assert!(!cfg.paths.processed_subdir.is_empty());
}

#[test]
fn defaults_match_example() {
    let raw = include_str!("../aso-filer.example.toml");
    let from_file: Config = toml::from_str(raw).expect("parse TOML");
    let defaults = Config::default();
    assert_eq!(
        from_file.extraction.name_start_triggers,
        defaults.extraction.name_start_triggers
    );
    assert_eq!(from_file.acquisition.ocr_char_budget, defaults.acquisition.ocr_char_budget);
    assert_eq!(from_file.naming.type_placeholder, defaults.naming.type_placeholder);
}

#[test]
fn partial_config_fills_missing_sections_with_defaults() {
    let cfg: Config = toml::from_str("[ocr]\ntessdata_dir = \"/opt/tessdata\"\nlanguage = \"eng\"\n")
        .expect("parse TOML");
    assert_eq!(cfg.ocr.language, "eng");
    assert_eq!(cfg.naming.certificate_prefix, "ASO DIGITALIZADO");
    assert_eq!(cfg.extraction.max_age_years, 5);
}
