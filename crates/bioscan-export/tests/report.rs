use jiff::civil::date;

use bioscan_core::models::assessment::AssessmentData;
use bioscan_core::models::edit::DataEdit;
use bioscan_core::models::measurement::Field;
use bioscan_core::models::screening::AnalysisResult;
use bioscan_export::docx::generate_docx;
use bioscan_export::error::ExportError;
use bioscan_export::render::{render_report, render_template};
use bioscan_export::report::ReportContext;
use bioscan_export::share::{share_payload, DOCX_MIME_TYPE, SHARE_SUBJECT};
use bioscan_export::styles::DocumentStyles;

fn analysis() -> AnalysisResult {
    AnalysisResult {
        id: Some(1),
        screening: Some(2),
        metabolic_score: 48,
        risk_level: None,
        insights: vec!["Fasting glucose is above the reference range.".into()],
        diabetes_risk_1yr: None,
        diabetes_risk_5yr: None,
        heart_risk: None,
        fatty_liver_risk: None,
        syndrome_flags: Vec::new(),
        abnormal_markers: Vec::new(),
    }
}

fn sample_report() -> ReportContext {
    ReportContext::build(&AssessmentData::sample(), Some(&analysis()), date(2024, 10, 24))
}

#[test]
fn context_flags_out_of_range_key_biomarkers() {
    let report = sample_report();
    let flagged: Vec<(&str, bool)> = report
        .biomarkers
        .iter()
        .map(|b| (b.label, b.flagged))
        .collect();
    assert_eq!(
        flagged,
        vec![
            ("Fasting Glucose", true),
            ("HbA1c", false),
            ("Triglycerides", true),
            ("LDL", true),
        ]
    );
    assert_eq!(report.date, "Oct 24, 2024");
    assert_eq!(report.risk_level, Some("Moderate"));
    assert_eq!(report.homa_ir.as_ref().unwrap().index, "1.3");
}

#[test]
fn built_in_report_has_the_three_sections() {
    let rendered = render_report(&sample_report().with_patient_ref("#8492")).unwrap();

    assert!(rendered.starts_with("# BioScan AI\nMetabolic Assessment Report\n"));
    assert!(rendered.contains("Date: Oct 24, 2024 | Patient ID: #8492"));
    assert!(rendered.contains("## 1. Summary"));
    assert!(rendered.contains("Metabolic score **48/100** (Moderate risk). 2 of 5 metabolic syndrome criteria met."));
    assert!(rendered.contains("## 2. Key Biomarkers"));
    assert!(rendered.contains("- Fasting Glucose: **108 mg/dL**"));
    assert!(rendered.contains("- HbA1c: 5.9 %"));
    assert!(rendered.contains("## 3. AI Analysis"));
    assert!(rendered.contains("HOMA-IR Score: **1.3** (Normal)."));
    assert!(rendered.contains("- HDL Cholesterol: within range"));
    assert!(rendered.contains("- Fasting glucose is above the reference range."));
    assert!(rendered.contains("- **Exercise Plan**: At least 150 min of moderate activity per week."));
    assert!(rendered.trim_end().ends_with("Not a diagnosis"));
}

#[test]
fn report_without_analysis_or_labs_still_renders() {
    let data = AssessmentData::default().apply(&DataEdit::measurement(Field::Hba1c, "6.1"));
    let rendered = render_report(&ReportContext::build(&data, None, date(2025, 1, 5))).unwrap();

    assert!(rendered.contains("0 of 5 metabolic syndrome criteria met."));
    assert!(!rendered.contains("Metabolic score"));
    assert!(rendered.contains("- Fasting Glucose: not recorded"));
    assert!(rendered.contains("- HbA1c: 6.1 %"));
    assert!(rendered.contains("HOMA-IR Score: not available."));
    assert!(!rendered.contains("within range"));
}

#[test]
fn custom_templates_see_the_same_context() {
    let rendered = render_template(
        "brief.md",
        "{{ title }} / {{ biomarkers | length }} markers / {{ plan.0.title }}",
        &sample_report(),
    )
    .unwrap();
    assert_eq!(rendered, "BioScan AI / 4 markers / Dietary Adjustments");
}

#[test]
fn broken_template_is_a_parse_error() {
    let err = render_template("bad.md", "{% if %}", &sample_report()).unwrap_err();
    assert!(matches!(err, ExportError::TemplateParse(_)));
}

#[test]
fn docx_is_a_zip_with_the_report_text() {
    let rendered = render_report(&sample_report()).unwrap();
    let bytes = generate_docx(&rendered, &DocumentStyles::default()).unwrap();

    assert_eq!(&bytes[..2], b"PK");
    assert!(has_entry(&bytes, "word/document.xml"));
    assert!(has_entry(&bytes, "word/styles.xml"));
}

#[test]
fn share_payload_carries_subject_and_type() {
    let payload = share_payload(&sample_report(), &DocumentStyles::default()).unwrap();
    assert_eq!(payload.subject, SHARE_SUBJECT);
    assert_eq!(payload.subject, "BioScan AI Medical Report");
    assert_eq!(payload.mime_type, DOCX_MIME_TYPE);
    assert!(payload.file_name.ends_with(".docx"));
    assert!(!payload.body.is_empty());
}

/// Entry names sit uncompressed in the zip headers.
fn has_entry(archive: &[u8], name: &str) -> bool {
    archive
        .windows(name.len())
        .any(|window| window == name.as_bytes())
}
