use crate::domain::Field;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    EmailRequired,
    EmailFormat,
    PasswordMinLength,
    PasswordMaxLength,
    PasswordLowercase,
    PasswordUppercase,
    PasswordDigit,
    PasswordSpecial,
    PasswordWhitespace,
}

impl Rule {
    pub fn field(self) -> Field {
        match self {
            Rule::EmailRequired | Rule::EmailFormat => Field::Email,
            _ => Field::Password,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Rule::EmailRequired => "email.required",
            Rule::EmailFormat => "email.format",
            Rule::PasswordMinLength => "password.min_length",
            Rule::PasswordMaxLength => "password.max_length",
            Rule::PasswordLowercase => "password.lowercase",
            Rule::PasswordUppercase => "password.uppercase",
            Rule::PasswordDigit => "password.digit",
            Rule::PasswordSpecial => "password.special",
            Rule::PasswordWhitespace => "password.whitespace",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Rule::EmailRequired => "Email is required",
            Rule::EmailFormat => "Enter a valid email address",
            Rule::PasswordMinLength => "Password must be at least 8 characters",
            Rule::PasswordMaxLength => "Password must be less than 64 characters",
            Rule::PasswordLowercase => "Must contain a lowercase letter",
            Rule::PasswordUppercase => "Must contain an uppercase letter",
            Rule::PasswordDigit => "Must contain a number",
            Rule::PasswordSpecial => "Must contain a special character",
            Rule::PasswordWhitespace => "Password must not contain spaces",
        }
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: Field,
    pub rule: Rule,
    pub message: String,
}

impl From<Rule> for FieldViolation {
    fn from(rule: Rule) -> Self {
        Self {
            field: rule.field(),
            rule,
            message: rule.message().to_string(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
