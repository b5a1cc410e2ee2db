use aso_filer::config::Extraction;
use aso_filer::extract::FieldExtractor;
use aso_filer::normalize::normalize;
use time::OffsetDateTime;

fn extractor() -> FieldExtractor {
    FieldExtractor::new(&Extraction::default()).expect("default rules compile")
}

fn year() -> i32 {
    OffsetDateTime::now_utc().year()
}

#[test]
fn same_date_recovered_for_every_separator_style() {
    let ex = extractor();
    let y = year();
    let expected = format!("1503{y:04}");
    for sep in ["/", ".", "-", ""] {
        let raw = format!("ASO EXAME REALIZADO EM 15{sep}03{sep}{y:04} ASSINATURA");
        let text = normalize(&raw);
        assert_eq!(
            ex.exam_date(&text).as_deref(),
            Some(expected.as_str()),
            "separator {sep:?}"
        );
    }
}

#[test]
fn birth_labeled_date_alone_yields_no_date() {
    let ex = extractor();
    let y = year();
    let text = normalize(&format!("PACIENTE FULANO NASC 15/03/{y:04} SEM OUTRA DATA"));
    assert_eq!(ex.exam_date(&text), None);
}

#[test]
fn birth_date_skipped_in_favor_of_exam_date() {
    let ex = extractor();
    let y = year();
    let text = normalize(&format!(
        "PACIENTE NASC 0101{y:04} EXAME ADMISSIONAL REALIZADO EM 1503{y:04} FIM"
    ));
    assert_eq!(ex.exam_date(&text).as_deref(), Some(format!("1503{y:04}").as_str()));
}

#[test]
fn last_surviving_candidate_wins() {
    let ex = extractor();
    let y = year();
    let text = normalize(&format!(
        "ASO EMITIDO EM 10/01/{y:04} ASSINADO EM 20/02/{y:04} FIM"
    ));
    assert_eq!(ex.exam_date(&text).as_deref(), Some(format!("2002{y:04}").as_str()));
}

#[test]
fn old_dates_are_treated_as_birth_dates() {
    let ex = extractor();
    let text = normalize("EXAME REALIZADO EM 15/03/1990 FIM DO DOCUMENTO");
    assert_eq!(ex.exam_date(&text), None);
}

#[test]
fn calendar_invalid_dates_are_rejected() {
    let ex = extractor();
    let y = year();
    assert_eq!(
        ex.exam_date(&normalize(&format!("ASO DOCUMENTO DATADO DE 30/02/{y:04} APENAS"))),
        None
    );
    assert_eq!(
        ex.exam_date(&normalize(&format!("ASO DOCUMENTO DATADO DE 32/01/{y:04} APENAS"))),
        None
    );
    assert_eq!(
        ex.exam_date(&normalize(&format!("ASO DOCUMENTO DATADO DE 15/13/{y:04} APENAS"))),
        None
    );
}

#[test]
fn date_at_the_very_start_is_discarded() {
    let ex = extractor();
    let y = year();
    let text = format!("1503{y:04} ASO");
    assert_eq!(ex.exam_date(&text), None);
}
