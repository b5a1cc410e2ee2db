use aso_filer::config::Extraction;
use aso_filer::extract::FieldExtractor;

fn extractor() -> FieldExtractor {
    FieldExtractor::new(&Extraction::default()).expect("default rules compile")
}

#[test]
fn captures_between_start_and_end_triggers() {
    let ex = extractor();
    assert_eq!(
        ex.employee_name("FUNCIONARIO JOAO DA SILVA SETOR 123"),
        "JOAO DA SILVA"
    );
}

#[test]
fn accented_trigger_matches() {
    let ex = extractor();
    assert_eq!(
        ex.employee_name("FUNCIONÁRIO MARIA SOUZA CPF 12345678900"),
        "MARIA SOUZA"
    );
}

#[test]
fn lowercase_text_is_matched_and_upper_cased() {
    let ex = extractor();
    assert_eq!(
        ex.employee_name("funcionario joao da silva setor x"),
        "JOAO DA SILVA"
    );
}

#[test]
fn bare_digit_ends_the_name() {
    let ex = extractor();
    assert_eq!(ex.employee_name("PACIENTE MARIA SOUZA 44 ANOS"), "MARIA SOUZA");
}

#[test]
fn bare_m_token_ends_the_name() {
    let ex = extractor();
    assert_eq!(
        ex.employee_name("COLABORADOR PEDRO ALVES M 1234"),
        "PEDRO ALVES"
    );
}

#[test]
fn stray_leading_nome_token_is_removed() {
    let ex = extractor();
    assert_eq!(
        ex.employee_name("EMPREGADO NOME ANA PAULA SETOR PRODUCAO"),
        "ANA PAULA"
    );
}

#[test]
fn compound_start_trigger_matches() {
    let ex = extractor();
    assert_eq!(
        ex.employee_name("TRABALHADOR NOME JOSE LIMA CPF 12345678900"),
        "JOSE LIMA"
    );
}

#[test]
fn no_trigger_yields_empty_name() {
    let ex = extractor();
    assert_eq!(ex.employee_name("ATESTADO OCUPACIONAL QUALQUER TEXTO"), "");
}
