use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Credentials, Field, NormalizedCredentials};
use crate::rules::{check_password, validate_email, FieldViolation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(NormalizedCredentials),
    Invalid(ViolationMap),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationMap(BTreeMap<Field, Vec<FieldViolation>>);

impl ViolationMap {
    pub fn insert(&mut self, field: Field, violations: Vec<FieldViolation>) {
        if violations.is_empty() {
            self.0.remove(&field);
        } else {
            self.0.insert(field, violations);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn get(&self, field: Field) -> &[FieldViolation] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn messages(&self, field: Field) -> Vec<&str> {
        self.get(field)
            .iter()
            .map(|violation| violation.message.as_str())
            .collect()
    }

    pub fn first_message(&self, field: Field) -> Option<&str> {
        self.get(field).first().map(|violation| violation.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &[FieldViolation])> {
        self.0
            .iter()
            .map(|(field, violations)| (*field, violations.as_slice()))
    }
}

pub fn validate(credentials: &Credentials) -> ValidationResult {
    let email = validate_email(&credentials.email);
    let password = check_password(&credentials.password);

    match (email, password.is_empty()) {
        (Ok(email), true) => ValidationResult::Valid(NormalizedCredentials::new(
            email,
            credentials.password.clone(),
        )),
        (email, _) => {
            let mut violations = ViolationMap::default();
            violations.insert(Field::Email, email.err().unwrap_or_default());
            violations.insert(Field::Password, password);
            ValidationResult::Invalid(violations)
        }
    }
}
