//! Shared test helpers for integration tests.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use serde_json::Value;

use hookline_hooks::{Callback, Hook};

/// Records the order in which callbacks run.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    log: Rc<RefCell<Vec<String>>>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.log.borrow_mut().push(entry.into());
    }

    /// Returns the recorded entries.
    pub fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Clears the trace.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// A callback that records its own id and returns `null`.
    pub fn recorder(&self, id: &str) -> Callback {
        self.recorder_with(id, |_| {})
    }

    /// A callback that records its own id, then runs `then` against the hook.
    pub fn recorder_with<F>(&self, id: &str, then: F) -> Callback
    where
        F: Fn(&Hook) + 'static,
    {
        let trace = self.clone();
        let name = id.to_string();
        Callback::new(id, move |hook, _| {
            trace.push(name.clone());
            then(hook);
            Value::Null
        })
    }
}

/// A callback that does nothing.
pub fn noop(id: &str) -> Callback {
    Callback::new(id, |_, _| Value::Null)
}

/// Path to a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
