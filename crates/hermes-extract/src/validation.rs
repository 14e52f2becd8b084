//! Field-level validation messages.
//!
//! Decoded bodies are validated with the [`validator`] crate. Its errors
//! are flattened into [`Violation`]s and rendered through a
//! [`MessageTemplates`] table, one sentence per violation, joined into a
//! single caller-facing message.

use std::collections::HashMap;

use serde_json::Value;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Prefix of every aggregated validation message.
const MESSAGE_PREFIX: &str = "validation error: ";

/// Message used when validation failed without any field-level detail.
const NO_DETAIL_MESSAGE: &str = "validation error: invalid data provided";

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field path (`email`, `address.city`, `items[2].sku`).
    pub field: String,
    /// Rule identifier (`required`, `email`, `min`, `max`, ...).
    pub rule: String,
    /// Rule parameter for parameterised rules (`8` for `min`).
    pub param: Option<String>,
}

impl Violation {
    /// Creates a violation without a parameter.
    #[must_use]
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            param: None,
        }
    }

    /// Sets the rule parameter.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }
}

/// Rule identifier → message template.
///
/// Templates may reference `{field}` and `{param}`. Unknown rules fall back
/// to `"{field} is invalid"`.
///
/// # Example
///
/// ```rust
/// use hermes_extract::validation::{MessageTemplates, Violation};
///
/// let templates = MessageTemplates::default()
///     .with_rule("url", "{field} must be a valid URL");
///
/// let min = Violation::new("password", "min").with_param("8");
/// assert_eq!(templates.render(&min), "password must be at least 8 characters");
///
/// let url = Violation::new("homepage", "url");
/// assert_eq!(templates.render(&url), "homepage must be a valid URL");
///
/// let other = Violation::new("age", "range");
/// assert_eq!(templates.render(&other), "age is invalid");
/// ```
#[derive(Debug, Clone)]
pub struct MessageTemplates {
    rules: HashMap<String, String>,
    fallback: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self::empty()
            .with_rule("required", "{field} is required")
            .with_rule("email", "{field} must be a valid email address")
            .with_rule("min", "{field} must be at least {param} characters")
            .with_rule("max", "{field} must be at most {param} characters")
    }
}

impl MessageTemplates {
    /// Creates a table with no rules, only the fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
            fallback: "{field} is invalid".to_string(),
        }
    }

    /// Adds or replaces the template for `rule`.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
        self.rules.insert(rule.into(), template.into());
        self
    }

    /// Replaces the template used for rules without an entry.
    #[must_use]
    pub fn with_fallback(mut self, template: impl Into<String>) -> Self {
        self.fallback = template.into();
        self
    }

    /// Renders one violation.
    #[must_use]
    pub fn render(&self, violation: &Violation) -> String {
        let template = self.rules.get(&violation.rule).unwrap_or(&self.fallback);
        template
            .replace("{field}", &violation.field)
            .replace("{param}", violation.param.as_deref().unwrap_or_default())
    }

    /// Renders all violations into one `"validation error: a; b"` message.
    #[must_use]
    pub fn aggregate(&self, violations: &[Violation]) -> String {
        if violations.is_empty() {
            return NO_DETAIL_MESSAGE.to_string();
        }

        let parts: Vec<String> = violations.iter().map(|v| self.render(v)).collect();
        format!("{MESSAGE_PREFIX}{}", parts.join("; "))
    }
}

/// Flattens `validator` errors into violations.
///
/// Nested struct errors become dotted paths and list errors indexed paths.
/// The result is sorted by field path so messages are deterministic.
#[must_use]
pub fn collect_violations(errors: &ValidationErrors) -> Vec<Violation> {
    let mut violations = Vec::new();
    collect_into(errors, None, &mut violations);
    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.rule.cmp(&b.rule)));
    violations
}

fn collect_into(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<Violation>) {
    for (name, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| to_violation(&path, e)));
            }
            ValidationErrorsKind::Struct(nested) => collect_into(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_into(nested, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}

fn to_violation(field: &str, error: &ValidationError) -> Violation {
    match &*error.code {
        "length" | "range" => match bound_rule(error) {
            Some((rule, param)) => Violation::new(field, rule).with_param(param),
            None => Violation::new(field, error.code.to_string()),
        },
        code => Violation::new(field, code),
    }
}

/// Maps `length`/`range` errors onto `min` or `max`, whichever bound was
/// violated.
fn bound_rule(error: &ValidationError) -> Option<(&'static str, String)> {
    let min = error.params.get("min");
    let max = error.params.get("max");
    let actual = error.params.get("value").and_then(measure);

    match (min, max) {
        (Some(min), Some(max)) => {
            let below = actual
                .zip(min.as_f64())
                .is_some_and(|(actual, min)| actual < min);
            if below {
                Some(("min", param_text(min)))
            } else {
                Some(("max", param_text(max)))
            }
        }
        (Some(min), None) => Some(("min", param_text(min))),
        (None, Some(max)) => Some(("max", param_text(max))),
        (None, None) => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn param_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
