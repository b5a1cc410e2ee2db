use aso_filer::extract::{ExamType, exam_type};

#[test]
fn keyword_anywhere_yields_code() {
    assert_eq!(
        exam_type("EXAME MEDICO ADMISSIONAL APTO"),
        Some(ExamType::Admission)
    );
    assert_eq!(
        exam_type("NATUREZA DO EXAME PERIODICO"),
        Some(ExamType::Periodic)
    );
    assert_eq!(exam_type("RETORNO AO TRABALHO"), Some(ExamType::ReturnToWork));
    assert_eq!(exam_type("EXAME DEMISSIONAL"), Some(ExamType::Dismissal));
}

#[test]
fn accented_periodic_matches() {
    assert_eq!(exam_type("exame periódico anual"), Some(ExamType::Periodic));
}

#[test]
fn role_change_requires_both_keywords_any_order() {
    assert_eq!(
        exam_type("MUDANCA DE FUNCAO DO TRABALHADOR"),
        Some(ExamType::RoleChange)
    );
    assert_eq!(
        exam_type("NOVA FUNCAO APOS MUDANCA DE SETOR"),
        Some(ExamType::RoleChange)
    );
    assert_eq!(exam_type("MUDANCA DE ENDERECO"), None);
    assert_eq!(exam_type("FUNCAO OPERADOR"), None);
}

#[test]
fn no_keyword_is_undefined() {
    assert_eq!(exam_type("EXAME CLINICO GERAL"), None);
}

#[test]
fn codes() {
    assert_eq!(ExamType::Admission.code(), "ADM");
    assert_eq!(ExamType::Periodic.code(), "PER");
    assert_eq!(ExamType::ReturnToWork.code(), "RT");
    assert_eq!(ExamType::RoleChange.code(), "MF");
    assert_eq!(ExamType::Dismissal.code(), "DEM");
}
