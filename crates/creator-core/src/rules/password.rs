use crate::rules::violation::{FieldViolation, Rule};

pub const MIN_PASSWORD_CHARS: usize = 8;
pub const MAX_PASSWORD_CHARS: usize = 64;

const CHARACTER_CLASSES: [(Rule, fn(&char) -> bool); 4] = [
    (Rule::PasswordLowercase, char::is_ascii_lowercase),
    (Rule::PasswordUppercase, char::is_ascii_uppercase),
    (Rule::PasswordDigit, char::is_ascii_digit),
    (Rule::PasswordSpecial, is_special),
];

pub fn check_password(password: &str) -> Vec<FieldViolation> {
    let mut out = Vec::new();

    let length = password.chars().count();
    if length < MIN_PASSWORD_CHARS {
        out.push(Rule::PasswordMinLength.into());
    } else if length > MAX_PASSWORD_CHARS {
        out.push(Rule::PasswordMaxLength.into());
    }

    for (rule, matches) in CHARACTER_CLASSES {
        if !password.chars().any(|ch| matches(&ch)) {
            out.push(rule.into());
        }
    }

    if password.chars().any(char::is_whitespace) {
        out.push(Rule::PasswordWhitespace.into());
    }

    out
}

fn is_special(ch: &char) -> bool {
    !ch.is_ascii_alphanumeric()
}
