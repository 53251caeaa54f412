use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::Field;
use crate::validation::ViolationMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub fields: BTreeMap<Field, String>,
    pub form: Option<String>,
}

impl FormErrors {
    pub fn from_violations(violations: &ViolationMap) -> Self {
        let fields = violations
            .iter()
            .filter_map(|(field, list)| list.first().map(|first| (field, first.message.clone())))
            .collect();
        Self { fields, form: None }
    }

    pub fn submission(message: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            form: Some(message.into()),
        }
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed(FormErrors),
}

impl SubmissionState {
    pub fn accepts_submit(&self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn errors(&self) -> Option<&FormErrors> {
        match self {
            SubmissionState::Failed(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    SubmitRequested,
    ValidationFailed(ViolationMap),
    ValidationPassed,
    SubmissionSucceeded,
    SubmissionFailed(String),
    Cancelled,
}

pub fn transition(state: SubmissionState, event: SubmissionEvent) -> SubmissionState {
    use SubmissionEvent as E;
    use SubmissionState as S;

    match (state, event) {
        (S::Idle | S::Failed(_), E::SubmitRequested) => S::Validating,
        (S::Validating, E::ValidationFailed(violations)) => {
            S::Failed(FormErrors::from_violations(&violations))
        }
        (S::Validating, E::ValidationPassed) => S::Submitting,
        (S::Submitting, E::SubmissionSucceeded) => S::Succeeded,
        (S::Submitting, E::SubmissionFailed(message)) => S::Failed(FormErrors::submission(message)),
        (S::Submitting, E::Cancelled) => S::Idle,
        (state, _) => state,
    }
}
