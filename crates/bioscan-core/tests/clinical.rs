use bioscan_core::clinical::{
    compare_all, homa_ir, metabolic_syndrome, CriterionStatus, InsulinResistance,
    COMPARISON_RANGES,
};
use bioscan_core::models::assessment::AssessmentData;
use bioscan_core::models::edit::DataEdit;
use bioscan_core::models::lifestyle::Gender;
use bioscan_core::models::measurement::Field;
use bioscan_core::models::screening::{AnalysisResult, RiskLevel};

fn statuses(data: &AssessmentData) -> Vec<CriterionStatus> {
    metabolic_syndrome(data)
        .criteria
        .iter()
        .map(|c| c.status)
        .collect()
}

#[test]
fn sample_meets_two_criteria() {
    // Male record: FPG 108 and TG 160 count, HDL 42 and waist 85 do not.
    let report = metabolic_syndrome(&AssessmentData::sample());
    assert_eq!(report.met, 2);
    assert!(!report.present);
    assert_eq!(
        statuses(&AssessmentData::sample()),
        vec![
            CriterionStatus::NotMet,
            CriterionStatus::Met,
            CriterionStatus::Met,
            CriterionStatus::NotMet,
            CriterionStatus::NotMet,
        ]
    );
}

#[test]
fn female_cutoffs_apply_to_hdl_and_waist() {
    let data = AssessmentData::sample().apply(&DataEdit::Gender {
        value: Some(Gender::Female),
    });
    let report = metabolic_syndrome(&data);
    // HDL 42 < 50 and waist 85 > 80 both count for a female record.
    assert_eq!(report.met, 4);
    assert!(report.present);
}

#[test]
fn diastolic_alone_meets_blood_pressure() {
    let data = AssessmentData::default()
        .with_measurements([(Field::Systolic, "118"), (Field::Diastolic, "86")]);
    assert_eq!(statuses(&data)[0], CriterionStatus::Met);
}

#[test]
fn missing_values_are_unknown() {
    let report = metabolic_syndrome(&AssessmentData::default());
    assert_eq!(report.met, 0);
    assert!(report
        .criteria
        .iter()
        .all(|c| c.status == CriterionStatus::Unknown));
}

#[test]
fn threshold_values_are_inclusive_where_labelled() {
    let data = AssessmentData::default().with_measurements([
        (Field::Fpg, "100"),
        (Field::Triglycerides, "150"),
        (Field::Hdl, "40"),
        (Field::Waist, "90"),
    ]);
    let s = statuses(&data);
    assert_eq!(s[1], CriterionStatus::Met);
    assert_eq!(s[2], CriterionStatus::Met);
    assert_eq!(s[3], CriterionStatus::NotMet);
    assert_eq!(s[4], CriterionStatus::NotMet);
}

#[test]
fn comparison_flags_out_of_range_markers() {
    let comparisons = compare_all(&AssessmentData::sample());
    assert_eq!(comparisons.len(), 4);

    let normal: Vec<bool> = comparisons.iter().map(|c| c.normal).collect();
    // FPG 108 high, LDL 145 high, TG 160 high, HDL 42 within range.
    assert_eq!(normal, vec![false, false, false, true]);
}

#[test]
fn comparison_position_is_clamped() {
    let glucose = COMPARISON_RANGES[0];
    assert_eq!(glucose.display_bounds(), (40.0, 130.0));
    assert_eq!(glucose.position(10.0), 0.0);
    assert_eq!(glucose.position(500.0), 1.0);
    assert!((glucose.position(85.0) - 0.5).abs() < 1e-9);
}

#[test]
fn homa_ir_bands() {
    let data = AssessmentData::default()
        .with_measurements([(Field::Fpg, "90"), (Field::Insulin, "4.5")]);
    let homa = homa_ir(&data).unwrap();
    assert!((homa.index - 1.0).abs() < 1e-9);
    assert_eq!(homa.band, InsulinResistance::Normal);

    assert_eq!(InsulinResistance::from_index(0.6), InsulinResistance::Optimal);
    assert_eq!(
        InsulinResistance::from_index(3.0),
        InsulinResistance::EarlyResistance
    );
    assert_eq!(
        InsulinResistance::from_index(3.4),
        InsulinResistance::SignificantResistance
    );
}

#[test]
fn homa_ir_needs_both_inputs() {
    let data = AssessmentData::default().with_measurement(Field::Fpg, "90");
    assert!(homa_ir(&data).is_none());
}

#[test]
fn risk_level_falls_back_to_score() {
    let json = r#"{"metabolic_score": 65, "insights": ["Elevated fasting glucose"]}"#;
    let result: AnalysisResult = serde_json::from_str(json).unwrap();
    assert_eq!(result.risk_level, None);
    assert_eq!(result.effective_risk_level(), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(60), RiskLevel::Moderate);
    assert_eq!(RiskLevel::from_score(30), RiskLevel::Low);
}
