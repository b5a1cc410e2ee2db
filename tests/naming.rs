use aso_filer::config::Naming;
use aso_filer::extract::{ExamType, ExtractionResult};
use aso_filer::naming::{compose_file_name, sanitize_file_name};

fn complete_fields() -> ExtractionResult {
    ExtractionResult {
        employee_name: "MARIA SOUZA".into(),
        exam_type: Some(ExamType::Admission),
        exam_date: Some("15032024".into()),
    }
}

#[test]
fn single_certificate_name() {
    let rules = Naming::default();
    assert_eq!(
        compose_file_name(&rules, 2, &complete_fields()),
        "ASO DIGITALIZADO - MARIA SOUZA ADM 15032024.pdf"
    );
}

#[test]
fn page_threshold_switches_to_record_prefix() {
    let rules = Naming::default();
    assert!(compose_file_name(&rules, 4, &complete_fields()).starts_with("PRONTUARIO DIGITALIZADO - "));
    // Exactly at the threshold is still a single certificate.
    assert!(compose_file_name(&rules, 3, &complete_fields()).starts_with("ASO DIGITALIZADO - "));
}

#[test]
fn missing_fields_use_sentinels() {
    let rules = Naming::default();
    let fields = ExtractionResult {
        employee_name: String::new(),
        exam_type: None,
        exam_date: None,
    };
    assert_eq!(
        compose_file_name(&rules, 1, &fields),
        "ASO DIGITALIZADO -  TYPE-UNDEFINED NO-DATE.pdf"
    );
}

#[test]
fn illegal_characters_are_replaced() {
    assert_eq!(sanitize_file_name("A/B\\C:D*E?F\"G<H>I|J.pdf"), "A_B_C_D_E_F_G_H_I_J.pdf");
    assert_eq!(sanitize_file_name("tab\there.pdf"), "tab_here.pdf");
}

#[test]
fn extracted_characters_flow_through_sanitizer() {
    let rules = Naming::default();
    let fields = ExtractionResult {
        employee_name: "MARIA/SOUZA".into(),
        exam_type: Some(ExamType::Periodic),
        exam_date: Some("01012024".into()),
    };
    assert_eq!(
        compose_file_name(&rules, 1, &fields),
        "ASO DIGITALIZADO - MARIA_SOUZA PER 01012024.pdf"
    );
}
