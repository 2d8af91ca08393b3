//! Hook registry — callbacks for one hook, bucketed by priority.
//!
//! Priorities are kept ascending by a `BTreeMap`; each bucket preserves
//! insertion order. Firing is re-entrant: callbacks receive the [`Hook`]
//! and may add, remove or fire again while the fire is in progress. No
//! `RefCell` borrow is held while a callback runs.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, info, trace};

use super::cursor::{CursorStack, PriorityBucket};
use super::definitions::{Callback, CallbackEntry, CallbackId, RegistrationInfo};

/// How a fire treats callback return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispatch {
    /// The first argument is replaced by each callback's return value.
    Filter,
    /// Return values are discarded.
    Action,
}

/// The ordered, priority-bucketed callbacks of one hook.
#[derive(Debug, Default)]
pub struct Hook {
    /// Priority → callbacks in insertion order.
    callbacks: RefCell<BTreeMap<i64, PriorityBucket>>,
    /// One cursor per active fire, innermost last.
    iterations: RefCell<CursorStack>,
}

impl Hook {
    /// Creates an empty hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a hook pre-populated with `(callback, priority, accepted_args)`
    /// registrations, applied in order.
    pub fn from_registrations<I>(registrations: I) -> Self
    where
        I: IntoIterator<Item = (Callback, i64, usize)>,
    {
        let hook = Self::new();
        for (callback, priority, accepted_args) in registrations {
            hook.add(callback, priority, accepted_args);
        }
        hook
    }

    /// Registers `callback` at `priority`.
    ///
    /// Re-adding an id already present at that priority overwrites its entry
    /// in place (its bucket position is kept).
    pub fn add(&self, callback: Callback, priority: i64, accepted_args: usize) {
        let id = callback.id().clone();
        let mut callbacks = self.callbacks.borrow_mut();
        let bucket = callbacks.entry(priority).or_default();
        let replaced = bucket
            .insert(
                id.clone(),
                CallbackEntry {
                    callback,
                    accepted_args,
                },
            )
            .is_some();

        debug!(
            callback = %id,
            priority,
            accepted_args,
            replaced,
            "Hook callback registered"
        );
    }

    /// Removes `id` from the bucket at `priority`.
    ///
    /// Returns whether an entry existed. An emptied bucket is dropped.
    pub fn remove(&self, id: &str, priority: i64) -> bool {
        let mut callbacks = self.callbacks.borrow_mut();
        let Some(bucket) = callbacks.get_mut(&priority) else {
            return false;
        };

        let existed = bucket.shift_remove(id).is_some();
        if bucket.is_empty() {
            callbacks.remove(&priority);
        }

        if existed {
            debug!(callback = %id, priority, "Hook callback removed");
        }
        existed
    }

    /// Returns whether any callback is registered.
    pub fn has_callbacks(&self) -> bool {
        self.callbacks.borrow().values().any(|bucket| !bucket.is_empty())
    }

    /// Returns the lowest priority at which `id` is registered.
    pub fn has_callback(&self, id: &str) -> Option<i64> {
        self.callbacks
            .borrow()
            .iter()
            .find(|(_, bucket)| bucket.contains_key(id))
            .map(|(&priority, _)| priority)
    }

    /// Returns whether `id` is registered at exactly `priority`.
    pub fn has_callback_at(&self, id: &str, priority: i64) -> bool {
        self.callbacks
            .borrow()
            .get(&priority)
            .is_some_and(|bucket| bucket.contains_key(id))
    }

    /// Removes every callback, or only the bucket at `priority`.
    ///
    /// Clearing everything also halts all in-progress fires of this hook:
    /// no further callback of those passes runs.
    pub fn remove_all(&self, priority: Option<i64>) {
        match priority {
            None => {
                self.callbacks.borrow_mut().clear();
                self.iterations.borrow_mut().halt_all();
                info!("All hook callbacks removed");
            }
            Some(priority) => {
                if self.callbacks.borrow_mut().remove(&priority).is_some() {
                    info!(priority, "Hook callbacks removed at priority");
                }
            }
        }
    }

    /// Runs every callback as a filter and returns the filtered value.
    ///
    /// `value` is argument 0; `extra` follows it. Each callback receives the
    /// leading arguments it accepts and its return value becomes the new
    /// argument 0.
    pub fn apply_filters(&self, value: Value, extra: &[Value]) -> Value {
        let mut args = Vec::with_capacity(extra.len() + 1);
        args.push(value);
        args.extend_from_slice(extra);
        self.dispatch(args, Dispatch::Filter)
    }

    /// Runs every callback as an action, ignoring return values.
    pub fn do_action(&self, args: &[Value]) {
        self.dispatch(args.to_vec(), Dispatch::Action);
    }

    /// Returns the priority being processed by the innermost active fire.
    pub fn current_priority(&self) -> Option<i64> {
        self.iterations
            .borrow()
            .innermost()
            .and_then(|cursor| cursor.priority())
    }

    /// Number of fires of this hook currently in progress.
    pub fn nesting_level(&self) -> usize {
        self.iterations.borrow().depth()
    }

    /// Returns whether this hook is being fired.
    pub fn is_firing(&self) -> bool {
        self.nesting_level() > 0
    }

    /// Registered priorities, ascending.
    pub fn priorities(&self) -> Vec<i64> {
        self.callbacks.borrow().keys().copied().collect()
    }

    /// Total number of registered callbacks across all priorities.
    pub fn len(&self) -> usize {
        self.callbacks.borrow().values().map(|bucket| bucket.len()).sum()
    }

    /// Returns whether no callback is registered.
    pub fn is_empty(&self) -> bool {
        !self.has_callbacks()
    }

    /// Returns the accepted argument count of `id` at `priority`.
    pub fn accepted_args(&self, id: &str, priority: i64) -> Option<usize> {
        self.callbacks
            .borrow()
            .get(&priority)
            .and_then(|bucket| bucket.get(id))
            .map(|entry| entry.accepted_args)
    }

    /// Lists registrations in firing order, labelled with `hook`.
    pub fn registrations(&self, hook: &str) -> Vec<RegistrationInfo> {
        self.callbacks
            .borrow()
            .iter()
            .flat_map(|(&priority, bucket)| {
                bucket.values().map(move |entry| RegistrationInfo {
                    hook: hook.to_string(),
                    priority,
                    callback: entry.callback.id().clone(),
                    accepted_args: entry.accepted_args,
                })
            })
            .collect()
    }

    /// Returns the ids registered at `priority`, in bucket order.
    pub fn callbacks_at(&self, priority: i64) -> Vec<CallbackId> {
        self.callbacks
            .borrow()
            .get(&priority)
            .map(|bucket| bucket.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn dispatch(&self, mut args: Vec<Value>, mode: Dispatch) -> Value {
        let level = self.iterations.borrow_mut().push();
        let _guard = IterationGuard { hook: self };

        trace!(level, ?mode, args = args.len(), "Firing hook");

        while let Some((priority, entry)) = self.next_entry(level) {
            trace!(
                callback = %entry.callback.id(),
                priority,
                level,
                "Invoking hook callback"
            );

            let result = entry.callback.call(self, entry.accepted(&args));
            if mode == Dispatch::Filter {
                match args.first_mut() {
                    Some(value) => *value = result,
                    None => args.push(result),
                }
            }
        }

        match mode {
            Dispatch::Filter => args.into_iter().next().unwrap_or(Value::Null),
            Dispatch::Action => Value::Null,
        }
    }

    fn next_entry(&self, level: usize) -> Option<(i64, CallbackEntry)> {
        let mut iterations = self.iterations.borrow_mut();
        let cursor = iterations.get_mut(level)?;
        cursor.advance(&self.callbacks.borrow())
    }
}

/// Pops the fire's cursor when the fire ends, including by unwinding.
struct IterationGuard<'a> {
    hook: &'a Hook,
}

impl Drop for IterationGuard<'_> {
    fn drop(&mut self) {
        self.hook.iterations.borrow_mut().pop();
    }
}
