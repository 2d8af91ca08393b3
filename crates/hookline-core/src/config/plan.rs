//! Hook plan: the registrations and fires the runner executes.

use serde::{Deserialize, Serialize};

/// One callback registration in a hook plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Name of the hook to register on.
    pub hook: String,
    /// Name of a builtin callback.
    pub callback: String,
    /// Priority; falls back to `hooks.default_priority`.
    #[serde(default)]
    pub priority: Option<i64>,
    /// Accepted argument count; falls back to `hooks.default_accepted_args`.
    #[serde(default)]
    pub accepted_args: Option<usize>,
}

/// Whether a fire threads a value through its callbacks or discards results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireMode {
    /// Each callback's return value becomes the first argument of the next.
    #[default]
    Filter,
    /// Callback return values are ignored.
    Action,
}

impl std::fmt::Display for FireMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Filter => write!(f, "filter"),
            Self::Action => write!(f, "action"),
        }
    }
}

/// One fire in a hook plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireConfig {
    /// Name of the hook to fire.
    pub hook: String,
    /// Filter or action.
    #[serde(default)]
    pub mode: FireMode,
    /// Arguments; for filters the first one is the value being filtered.
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}
