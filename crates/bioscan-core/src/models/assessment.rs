use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, FieldError};

use super::lifestyle::{Alcohol, Gender, PhysicalActivity, Sleep, SmokingStatus};
use super::measurement::{Field, Measurement};
use super::selection::ConditionSet;

/// Everything the wizard collects for one assessment.
///
/// Treated as an immutable snapshot: every edit produces a new value and
/// leaves the previous one untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentData {
    // Demographics
    pub age: Measurement,
    pub gender: Option<Gender>,
    pub height: Measurement,
    pub weight: Measurement,

    // Lifestyle
    pub smoking_status: Option<SmokingStatus>,
    pub alcohol: Option<Alcohol>,
    pub sleep: Option<Sleep>,
    pub physical_activity: Option<PhysicalActivity>,

    // Vitals
    pub systolic: Measurement,
    pub diastolic: Measurement,
    pub heart_rate: Measurement,
    pub waist: Measurement,

    pub symptoms: ConditionSet,

    // Lab values
    pub fpg: Measurement,
    pub ppg: Measurement,
    pub hba1c: Measurement,
    pub total_cholesterol: Measurement,
    pub ldl: Measurement,
    pub hdl: Measurement,
    pub triglycerides: Measurement,
    pub creatinine: Measurement,
    pub bun: Measurement,
    pub alt: Measurement,
    pub ast: Measurement,
    pub ggt: Measurement,
    pub insulin: Measurement,
    pub tsh: Measurement,
    pub hscrp: Measurement,
    pub esr: Measurement,

    // History
    pub family_history: ConditionSet,
    pub medical_history: ConditionSet,
}

impl AssessmentData {
    /// The prefilled demo intake the product ships with.
    pub fn sample() -> Self {
        Self {
            age: "35".into(),
            gender: Some(Gender::Male),
            height: "175".into(),
            weight: "70".into(),
            smoking_status: Some(SmokingStatus::Never),
            alcohol: Some(Alcohol::None),
            sleep: Some(Sleep::SixToEight),
            physical_activity: Some(PhysicalActivity::Active),
            systolic: "120".into(),
            diastolic: "80".into(),
            heart_rate: "72".into(),
            waist: "85".into(),
            symptoms: ConditionSet::new(),
            fpg: "108".into(),
            ppg: "140".into(),
            hba1c: "5.9".into(),
            total_cholesterol: "180".into(),
            ldl: "145".into(),
            hdl: "42".into(),
            triglycerides: "160".into(),
            creatinine: "0.9".into(),
            bun: "12".into(),
            alt: "25".into(),
            ast: "22".into(),
            ggt: "30".into(),
            insulin: "5.0".into(),
            tsh: "2.5".into(),
            hscrp: "2.5".into(),
            esr: Measurement::default(),
            family_history: ["Type 2 Diabetes"].into_iter().collect(),
            medical_history: ["Pre-diabetes"].into_iter().collect(),
        }
    }

    pub fn measurement(&self, field: Field) -> &Measurement {
        match field {
            Field::Age => &self.age,
            Field::Height => &self.height,
            Field::Weight => &self.weight,
            Field::Systolic => &self.systolic,
            Field::Diastolic => &self.diastolic,
            Field::HeartRate => &self.heart_rate,
            Field::Waist => &self.waist,
            Field::Fpg => &self.fpg,
            Field::Ppg => &self.ppg,
            Field::Hba1c => &self.hba1c,
            Field::TotalCholesterol => &self.total_cholesterol,
            Field::Ldl => &self.ldl,
            Field::Hdl => &self.hdl,
            Field::Triglycerides => &self.triglycerides,
            Field::Creatinine => &self.creatinine,
            Field::Bun => &self.bun,
            Field::Alt => &self.alt,
            Field::Ast => &self.ast,
            Field::Ggt => &self.ggt,
            Field::Insulin => &self.insulin,
            Field::Tsh => &self.tsh,
            Field::Hscrp => &self.hscrp,
            Field::Esr => &self.esr,
        }
    }

    fn measurement_mut(&mut self, field: Field) -> &mut Measurement {
        match field {
            Field::Age => &mut self.age,
            Field::Height => &mut self.height,
            Field::Weight => &mut self.weight,
            Field::Systolic => &mut self.systolic,
            Field::Diastolic => &mut self.diastolic,
            Field::HeartRate => &mut self.heart_rate,
            Field::Waist => &mut self.waist,
            Field::Fpg => &mut self.fpg,
            Field::Ppg => &mut self.ppg,
            Field::Hba1c => &mut self.hba1c,
            Field::TotalCholesterol => &mut self.total_cholesterol,
            Field::Ldl => &mut self.ldl,
            Field::Hdl => &mut self.hdl,
            Field::Triglycerides => &mut self.triglycerides,
            Field::Creatinine => &mut self.creatinine,
            Field::Bun => &mut self.bun,
            Field::Alt => &mut self.alt,
            Field::Ast => &mut self.ast,
            Field::Ggt => &mut self.ggt,
            Field::Insulin => &mut self.insulin,
            Field::Tsh => &mut self.tsh,
            Field::Hscrp => &mut self.hscrp,
            Field::Esr => &mut self.esr,
        }
    }

    /// Copy of `self` with one measurement replaced.
    pub fn with_measurement(&self, field: Field, value: impl Into<Measurement>) -> Self {
        let mut next = self.clone();
        *next.measurement_mut(field) = value.into();
        next
    }

    /// Copy of `self` with several measurements replaced at once.
    pub fn with_measurements<I, M>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = (Field, M)>,
        M: Into<Measurement>,
    {
        let mut next = self.clone();
        for (field, value) in values {
            *next.measurement_mut(field) = value.into();
        }
        next
    }

    /// Lenient numeric read of a field, for display rules.
    pub fn value(&self, field: Field) -> Option<f64> {
        self.measurement(field).value()
    }

    /// Check every measurement for submission. All failures are reported.
    pub fn validate(&self) -> Result<ValidatedAssessment, CoreError> {
        let mut values = BTreeMap::new();
        let mut errors: Vec<FieldError> = Vec::new();

        for field in Field::ALL {
            match self.measurement(field).validate(field) {
                Ok(Some(v)) => {
                    values.insert(field, v);
                }
                Ok(None) => {}
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            return Err(CoreError::Validation { errors });
        }

        Ok(ValidatedAssessment {
            values,
            gender: self.gender,
            smoking_status: self.smoking_status,
            alcohol: self.alcohol,
            sleep: self.sleep,
            physical_activity: self.physical_activity,
            symptoms: self.symptoms.clone(),
            family_history: self.family_history.clone(),
            medical_history: self.medical_history.clone(),
        })
    }
}

/// An assessment whose measurements all parsed. Blank fields are absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedAssessment {
    pub values: BTreeMap<Field, f64>,
    pub gender: Option<Gender>,
    pub smoking_status: Option<SmokingStatus>,
    pub alcohol: Option<Alcohol>,
    pub sleep: Option<Sleep>,
    pub physical_activity: Option<PhysicalActivity>,
    pub symptoms: ConditionSet,
    pub family_history: ConditionSet,
    pub medical_history: ConditionSet,
}

impl ValidatedAssessment {
    pub fn get(&self, field: Field) -> Option<f64> {
        self.values.get(&field).copied()
    }

    /// Body-mass index from height (cm) and weight (kg), when both are present.
    pub fn bmi(&self) -> Option<f64> {
        let height_m = self.get(Field::Height)? / 100.0;
        let weight = self.get(Field::Weight)?;
        (height_m > 0.0).then(|| weight / (height_m * height_m))
    }
}
