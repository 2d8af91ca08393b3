//! Hook registry defaults.

use serde::{Deserialize, Serialize};

/// Priority used when a registration does not name one.
pub const DEFAULT_PRIORITY: i64 = 10;

/// Accepted-argument count used when a registration does not name one.
pub const DEFAULT_ACCEPTED_ARGS: usize = 1;

/// Defaults applied by the named hook table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Priority for registrations without an explicit one (lower fires first).
    #[serde(default = "default_priority")]
    pub default_priority: i64,
    /// Number of leading arguments passed to callbacks by default.
    #[serde(default = "default_accepted_args")]
    pub default_accepted_args: usize,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
            default_accepted_args: DEFAULT_ACCEPTED_ARGS,
        }
    }
}

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

fn default_accepted_args() -> usize {
    DEFAULT_ACCEPTED_ARGS
}
