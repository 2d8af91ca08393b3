//! Callback definitions shared by the registry and the named hook table.

use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::registry::Hook;

/// Signature of a hook callback.
///
/// The callback receives the hook it is being fired from (so it may add,
/// remove or fire again) and the leading arguments it accepted. For filters
/// the returned value replaces the value being filtered; for actions it is
/// discarded.
pub type CallbackFn = dyn Fn(&Hook, &[Value]) -> Value;

/// Identity of a callback. Unique within a priority bucket and used as the
/// removal key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(String);

impl CallbackId {
    /// Creates a callback identity from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallbackId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CallbackId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for CallbackId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Buckets are looked up by `&str`.
impl Borrow<str> for CallbackId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A named, callable hook callback. Cheap to clone.
#[derive(Clone)]
pub struct Callback {
    id: CallbackId,
    function: Rc<CallbackFn>,
}

impl Callback {
    /// Wraps a closure under the given identity.
    pub fn new<F>(id: impl Into<CallbackId>, function: F) -> Self
    where
        F: Fn(&Hook, &[Value]) -> Value + 'static,
    {
        Self {
            id: id.into(),
            function: Rc::new(function),
        }
    }

    /// Returns the callback identity.
    pub fn id(&self) -> &CallbackId {
        &self.id
    }

    /// Invokes the callback.
    pub fn call(&self, hook: &Hook, args: &[Value]) -> Value {
        (self.function)(hook, args)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").field("id", &self.id).finish()
    }
}

/// A registered callback and the number of leading arguments it accepts.
#[derive(Debug, Clone)]
pub struct CallbackEntry {
    /// The callback.
    pub callback: Callback,
    /// Arguments passed on fire: `min(accepted_args, supplied)`.
    pub accepted_args: usize,
}

impl CallbackEntry {
    /// Returns the leading slice of `args` this entry accepts.
    pub fn accepted<'a>(&self, args: &'a [Value]) -> &'a [Value] {
        &args[..self.accepted_args.min(args.len())]
    }
}

/// Serializable view of one registration, used for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationInfo {
    /// Hook name (empty when listing a bare registry).
    pub hook: String,
    /// Bucket priority.
    pub priority: i64,
    /// Callback identity.
    pub callback: CallbackId,
    /// Accepted argument count.
    pub accepted_args: usize,
}
