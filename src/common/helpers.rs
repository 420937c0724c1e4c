// Helper functions for safe logging

use serde_json::Value;

/// JSON fields whose values never reach the logs
const SENSITIVE_FIELDS: &[&str] = &["password", "access_token", "token"];

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```ignore
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    let parts: Vec<&str> = email.split('@').collect();
    match parts.as_slice() {
        [local, domain] if email.len() > 3 => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => format!("***@{}", domain),
        },
        _ => "***@***.***".to_string(),
    }
}

/// Masks tokens for safe logging
/// Shows only first and last 4 characters
pub fn safe_token_log(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}

/// Replaces sensitive values in a JSON document, recursively
pub fn redact_json(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if SENSITIVE_FIELDS.contains(&key.to_lowercase().as_str()) {
                    *field = Value::String("***".to_string());
                } else {
                    redact_json(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_json),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_email_log() {
        assert_eq!(safe_email_log("user@example.com"), "u***@example.com");
        assert_eq!(safe_email_log("a@x"), "***@***.***");
        assert_eq!(safe_email_log("not-an-email"), "***@***.***");
    }

    #[test]
    fn test_safe_token_log() {
        assert_eq!(
            safe_token_log("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"),
            "eyJh...VCJ9"
        );
        assert_eq!(safe_token_log("short"), "***");
    }

    #[test]
    fn test_redact_json_nested() {
        let mut body = json!({
            "email": "a@x.com",
            "password": "Secret123",
            "nested": [{ "access_token": "abc" }]
        });

        redact_json(&mut body);

        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["password"], "***");
        assert_eq!(body["nested"][0]["access_token"], "***");
    }
}
