//! Hook system — per-hook registries, iteration cursors, the named hook
//! table, and builtin callbacks.

pub mod builtins;
pub mod cursor;
pub mod definitions;
pub mod registry;
pub mod table;

pub use definitions::{Callback, CallbackEntry, CallbackId, RegistrationInfo};
pub use registry::Hook;
pub use table::HookTable;
