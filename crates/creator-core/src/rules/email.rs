use crate::domain::normalize_email;
use crate::rules::violation::{FieldViolation, Rule};

pub fn check_email(raw: &str) -> Vec<FieldViolation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return vec![Rule::EmailRequired.into()];
    }
    if !is_email_shape(trimmed) {
        return vec![Rule::EmailFormat.into()];
    }
    Vec::new()
}

pub fn validate_email(raw: &str) -> Result<String, Vec<FieldViolation>> {
    let violations = check_email(raw);
    if !violations.is_empty() {
        return Err(violations);
    }
    normalize_email(raw).ok_or_else(|| vec![Rule::EmailRequired.into()])
}

pub fn is_email_shape(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, ch)| ch == '.' && idx > 0 && idx + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::{check_email, is_email_shape, validate_email};
    use crate::rules::Rule;

    fn rules(raw: &str) -> Vec<Rule> {
        check_email(raw).into_iter().map(|v| v.rule).collect()
    }

    #[test]
    fn empty_email_only_reports_required() {
        assert_eq!(rules(""), vec![Rule::EmailRequired]);
        assert_eq!(rules("   "), vec![Rule::EmailRequired]);
    }

    #[test]
    fn accepts_simple_addresses() {
        assert!(is_email_shape("a@b.co"));
        assert!(is_email_shape("first.last@mail.example.org"));
        assert!(is_email_shape("x@a.b.c"));
        assert!(rules(" Foo@Bar.COM ").is_empty());
    }

    #[test]
    fn validate_email_normalizes_only_valid_input() {
        assert_eq!(
            validate_email("  USER@Example.COM ").as_deref(),
            Ok("user@example.com")
        );
        let err = validate_email("USER@Example").unwrap_err();
        assert_eq!(err[0].rule, Rule::EmailFormat);
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in [
            "plainaddress",
            "@example.com",
            "user@",
            "user@example",
            "user@.com",
            "user@example.",
            "a@b@c.com",
            "us er@example.com",
            "user@exa\tmple.com",
        ] {
            assert_eq!(rules(raw), vec![Rule::EmailFormat], "input {:?}", raw);
        }
    }
}
