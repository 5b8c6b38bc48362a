//! Diff generation for audit logging
//!
//! Produces a one-line summary of the top-level fields that changed between
//! two serialized entities.

use serde_json::Value;

use crate::models::Money;

/// Bookkeeping fields that change on every update and are left out of diffs
const IGNORED_FIELDS: [&str; 2] = ["created_at", "updated_at"];

/// Fields holding integer cents, rendered as money
const MONEY_FIELDS: [&str; 1] = ["amount"];

/// Generate a human-readable diff between two JSON values
///
/// Returns `None` when nothing worth reporting changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_field(key, before_val),
                        format_field(key, after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_field(key, before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        key,
                        format_field(key, after_val)
                    ));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

fn format_field(key: &str, value: &Value) -> String {
    match value.as_i64() {
        Some(cents) if MONEY_FIELDS.contains(&key) => Money::from_cents(cents).to_string(),
        _ => format_value(value),
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
