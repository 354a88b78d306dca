use serde_json::Value;

use crate::error::{ErrorBody, FieldError};

const STATUS_MIN: i64 = 100;
const STATUS_MAX: i64 = 599;

/// One place where a candidate body deviates from the error-response shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Validate a JSON value against the error-response shape
///
/// Safe-parse contract: never panics and never returns through an error
/// channel other than the violation list. Requires `status` to be an integer
/// in [100, 599], `title` and `message` to be present strings, and `errors`
/// to be an array of `{field, message}` objects (possibly empty, order
/// preserved).
pub fn safe_parse(value: &Value) -> Result<ErrorBody, Vec<Violation>> {
    let Some(obj) = value.as_object() else {
        return Err(vec![Violation::new("", "Expected object")]);
    };

    let mut violations = Vec::new();

    let mut status = None;
    match obj.get("status").and_then(Value::as_i64) {
        Some(s) if (STATUS_MIN..=STATUS_MAX).contains(&s) => status = Some(s as u16),
        Some(_) => violations.push(Violation::new(
            "status",
            format!("Status must be between {STATUS_MIN} and {STATUS_MAX}"),
        )),
        None => violations.push(Violation::new("status", "Expected integer")),
    }

    let title = match obj.get("title").and_then(Value::as_str) {
        Some(t) => Some(t.to_owned()),
        None => {
            violations.push(Violation::new("title", "Expected string"));
            None
        }
    };

    let message = match obj.get("message").and_then(Value::as_str) {
        Some(m) => Some(m.to_owned()),
        None => {
            violations.push(Violation::new("message", "Expected string"));
            None
        }
    };

    let mut errors = Vec::new();
    match obj.get("errors") {
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                let field = item.get("field").and_then(Value::as_str);
                let text = item.get("message").and_then(Value::as_str);
                match (field, text) {
                    (Some(f), Some(m)) => errors.push(FieldError::new(f, m)),
                    (None, _) => violations
                        .push(Violation::new(format!("errors.{i}.field"), "Expected string")),
                    (_, None) => violations
                        .push(Violation::new(format!("errors.{i}.message"), "Expected string")),
                }
            }
        }
        Some(_) => violations.push(Violation::new("errors", "Expected array")),
        None => violations.push(Violation::new("errors", "Expected array")),
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    // Every None above pushed a violation, so all three are Some here.
    match (status, title, message) {
        (Some(status), title @ Some(_), message @ Some(_)) => Ok(ErrorBody {
            status,
            title,
            message,
            errors,
        }),
        _ => Err(vec![Violation::new("", "Expected object")]),
    }
}
