//! Builtin callbacks that can be referenced by name from a hook plan.

use serde_json::{Value, json};

use hookline_core::error::AppError;

use super::definitions::Callback;

/// Names of every builtin callback.
pub const BUILTIN_NAMES: &[&str] = &[
    "__return_true",
    "__return_false",
    "__return_null",
    "__return_zero",
    "__return_empty_array",
    "__return_empty_string",
    "identity",
];

/// Looks up a builtin callback by name.
pub fn builtin(name: &str) -> Option<Callback> {
    let value = match name {
        "__return_true" => json!(true),
        "__return_false" => json!(false),
        "__return_null" => Value::Null,
        "__return_zero" => json!(0),
        "__return_empty_array" => json!([]),
        "__return_empty_string" => json!(""),
        "identity" => {
            return Some(Callback::new(name, |_, args| {
                args.first().cloned().unwrap_or(Value::Null)
            }));
        }
        _ => return None,
    };

    Some(Callback::new(name, move |_, _| value.clone()))
}

/// Looks up a builtin callback, failing with a validation error for
/// unknown names.
pub fn resolve(name: &str) -> Result<Callback, AppError> {
    builtin(name).ok_or_else(|| {
        AppError::validation(format!(
            "Unknown callback '{}'; expected one of: {}",
            name,
            BUILTIN_NAMES.join(", ")
        ))
    })
}
