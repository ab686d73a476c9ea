use bioscan_core::models::edit::DataEdit;
use bioscan_core::models::lifestyle::SmokingStatus;
use bioscan_core::models::measurement::Field;
use bioscan_wizard::error::WizardError;
use bioscan_wizard::registry::{self, all_descriptors, describe_position, ContentKind};
use bioscan_wizard::step::{LabPanel, ResultStage, Section, WizardPosition, WizardStep};

fn at(step: u8, sub_step: u8) -> registry::StepDescriptor {
    describe_position(WizardPosition::new(step, sub_step)).unwrap()
}

#[test]
fn every_step_round_trips_through_its_position() {
    for step in WizardStep::all() {
        assert_eq!(WizardStep::from_position(step.position()), Ok(step));
    }
    assert_eq!(all_descriptors().len(), 1 + 7 + 1 + 6 + 1 + 1 + 9 + 1);
}

#[test]
fn unmapped_positions_fail_fast() {
    for (step, sub_step) in [(8, 7), (8, 9), (20, 0), (20, 8), (255, 0)] {
        assert_eq!(
            describe_position(WizardPosition::new(step, sub_step)).unwrap_err(),
            WizardError::UnmappedPosition { step, sub_step }
        );
    }
}

#[test]
fn sub_step_is_ignored_outside_the_lab_section() {
    assert_eq!(at(5, 2).step, WizardStep::Section(Section::Vitals));
    assert_eq!(at(0, 8).step, WizardStep::Intro);
    assert_eq!(at(9, 0).step, WizardStep::Analyzing);
    assert_eq!(at(12, 0).step, WizardStep::Result(ResultStage::from_number(12).unwrap()));
    assert_eq!(at(19, 0).step, WizardStep::Report);

    // The descriptor still carries the canonical address.
    assert_eq!(at(10, 0).position, WizardPosition::new(10, 8));
    assert_eq!(at(5, 8).position, WizardPosition::new(5, 0));
}

#[test]
fn own_actions_replace_the_shared_button() {
    assert_eq!(at(0, 0).own_actions, &[registry::START_LABEL]);
    assert_eq!(
        at(8, 0).own_actions,
        &[registry::ENTER_MANUALLY_LABEL, registry::EXTRACT_LABEL]
    );
    for descriptor in all_descriptors() {
        if !descriptor.own_actions.is_empty() {
            assert_eq!(descriptor.primary_action, None, "{}", descriptor.step);
        }
    }
    assert!(at(8, 8).own_actions.is_empty());
}

#[test]
fn steps_round_trip_through_json() {
    for step in WizardStep::all() {
        let json = serde_json::to_string(&step).unwrap();
        let back: WizardStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }
    assert_eq!(
        serde_json::to_value(WizardStep::LabPanel(LabPanel::Liver)).unwrap(),
        serde_json::json!({ "kind": "lab_panel", "value": "liver" })
    );
    assert_eq!(
        serde_json::to_value(WizardStep::Report).unwrap(),
        serde_json::json!({ "kind": "report" })
    );
}

#[test]
fn progress_fractions() {
    let p = at(3, 0).progress.unwrap();
    assert_eq!(p.fraction, 3.0 / 8.0);
    assert_eq!(p.label(), "Step 3 of 8");
    assert_eq!(p.percent(), 37);

    assert_eq!(at(8, 4).progress.unwrap().fraction, 0.5);
    assert_eq!(at(8, 8).progress.unwrap().fraction, 1.0);
    assert_eq!(at(8, 8).progress.unwrap().label(), "Step 8 of 8");

    assert!(at(0, 0).progress.is_none());
    assert!(at(9, 8).progress.is_none());
    assert!(at(12, 8).progress.is_none());
}

#[test]
fn titles() {
    assert_eq!(at(1, 0).title, Some("Basic Information"));
    assert_eq!(at(7, 0).title, Some("Review Data"));
    assert_eq!(at(8, 0).title, Some("Lab Reports"));
    assert_eq!(at(8, 6).title, Some("Inflammation"));
    assert_eq!(at(8, 8).title, Some("Review Biomarkers"));
    assert_eq!(at(10, 8).title, Some("AI Analysis Results"));
    assert_eq!(at(19, 8).title, Some("Medical Report"));
    assert_eq!(at(0, 0).title, None);
    assert_eq!(at(9, 8).title, None);
}

#[test]
fn primary_button_hidden_where_the_screen_has_its_own_actions() {
    assert_eq!(at(0, 0).primary_action, None);
    assert_eq!(at(8, 0).primary_action, None);
    assert_eq!(at(9, 8).primary_action, None);
    assert_eq!(at(19, 8).primary_action, None);
}

#[test]
fn primary_button_labels() {
    assert_eq!(at(1, 0).primary_action, Some("Next Step"));
    assert_eq!(at(6, 0).primary_action, Some("Review Data"));
    assert_eq!(at(7, 0).primary_action, Some("Confirm & Continue"));
    assert_eq!(at(8, 3).primary_action, Some("Next Step"));
    assert_eq!(at(8, 8).primary_action, Some("Run AI Analysis"));
    assert_eq!(at(10, 8).primary_action, Some("Verify & Continue"));
    assert_eq!(at(14, 8).primary_action, Some("Next: Metabolic Syndrome"));
    assert_eq!(at(18, 8).primary_action, Some("View Full Report"));
}

#[test]
fn content_and_editable_fields() {
    assert_eq!(
        registry::content(WizardStep::LabPanel(LabPanel::Liver)),
        ContentKind::LabPanel(LabPanel::Liver)
    );
    assert_eq!(
        ContentKind::LabPanel(LabPanel::Liver).editable_fields(),
        &[Field::Alt, Field::Ast, Field::Ggt]
    );
    assert_eq!(
        registry::content(WizardStep::Result(ResultStage::Heart)),
        ContentKind::Result(ResultStage::Heart)
    );

    let lifestyle = registry::content(WizardStep::Section(Section::Lifestyle));
    assert!(lifestyle.accepts(&DataEdit::SmokingStatus {
        value: SmokingStatus::Former
    }));
    assert!(!lifestyle.accepts(&DataEdit::measurement(Field::Age, "30")));
    assert!(ContentKind::ReviewBiomarkers.editable_fields().is_empty());
}

#[test]
fn every_lab_field_has_a_panel() {
    let mut covered: Vec<Field> = LabPanel::ALL
        .iter()
        .flat_map(|p| p.fields().iter().copied())
        .collect();
    covered.sort();
    let mut lab: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|f| f.is_lab_value())
        .collect();
    lab.sort();
    assert_eq!(covered, lab);
}

#[test]
fn only_the_analysis_step_lacks_a_way_back() {
    for descriptor in all_descriptors() {
        assert_eq!(descriptor.has_back, descriptor.step != WizardStep::Analyzing);
    }
}
