pub fn normalize_email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::normalize_email;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  Ada@Example.com ");
        assert_eq!(value.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn normalize_email_is_idempotent() {
        for raw in [" Foo@Bar.COM ", "user@example.com", "MiXeD@Sub.Domain.Org"] {
            let once = normalize_email(raw).expect("normalized");
            let twice = normalize_email(&once).expect("normalized again");
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn normalize_email_rejects_blank() {
        assert_eq!(normalize_email("   "), None);
    }
}
