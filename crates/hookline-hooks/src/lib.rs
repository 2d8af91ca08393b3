//! # hookline-hooks
//!
//! Priority-ordered hook and filter dispatch. Provides:
//!
//! - [`Hook`]: one hook's callbacks, bucketed by ascending priority, with
//!   re-entrant firing that tolerates mutation mid-fire
//! - [`HookTable`]: name-keyed hooks with action counters and the current
//!   hook stack
//! - builtin `__return_*` callbacks and plan loading from configuration

pub mod hooks;
pub mod plan;

pub use hooks::builtins;
pub use hooks::definitions::{Callback, CallbackEntry, CallbackId, RegistrationInfo};
pub use hooks::registry::Hook;
pub use hooks::table::HookTable;
pub use plan::{FireOutcome, build_table, run_fires};
