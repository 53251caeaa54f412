pub mod dashboard;
pub mod domain;
pub mod error;
pub mod rules;
pub mod state;
pub mod validation;

pub use domain::*;
pub use error::CoreError;
pub use rules::{FieldViolation, Rule};
pub use state::{transition, FormErrors, SubmissionEvent, SubmissionState};
pub use validation::{validate, ValidationResult, ViolationMap};
