//! Named hook table — maps hook names to [`Hook`] registries.
//!
//! This is the name-keyed surface (`add_filter`, `apply_filters`,
//! `do_action`, ...) over per-hook registries. It also tracks which hooks
//! are being fired and how many times each action ran.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use hookline_core::config::hooks::HooksConfig;

use super::definitions::{Callback, RegistrationInfo};
use super::registry::Hook;

/// Registry of hooks keyed by name.
#[derive(Debug, Default)]
pub struct HookTable {
    /// Hook name → registry.
    hooks: RefCell<HashMap<String, Rc<Hook>>>,
    /// Names of hooks being fired, innermost last.
    current: RefCell<Vec<String>>,
    /// Action name → number of times fired.
    actions: RefCell<HashMap<String, u64>>,
    /// Defaults for priority and accepted args.
    config: HooksConfig,
}

impl HookTable {
    /// Creates an empty table with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table using the given defaults.
    pub fn with_config(config: HooksConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the table's defaults.
    pub fn config(&self) -> &HooksConfig {
        &self.config
    }

    /// Registers a filter callback on `name`.
    ///
    /// `None` for `priority` or `accepted_args` selects the configured
    /// default.
    pub fn add_filter(
        &self,
        name: &str,
        callback: Callback,
        priority: Option<i64>,
        accepted_args: Option<usize>,
    ) {
        let hook = Rc::clone(
            self.hooks
                .borrow_mut()
                .entry(name.to_string())
                .or_insert_with(|| Rc::new(Hook::new())),
        );

        debug!(hook = %name, callback = %callback.id(), "Adding callback to hook");
        hook.add(
            callback,
            priority.unwrap_or(self.config.default_priority),
            accepted_args.unwrap_or(self.config.default_accepted_args),
        );
    }

    /// Registers an action callback on `name`. Actions and filters share
    /// the same registries.
    pub fn add_action(
        &self,
        name: &str,
        callback: Callback,
        priority: Option<i64>,
        accepted_args: Option<usize>,
    ) {
        self.add_filter(name, callback, priority, accepted_args);
    }

    /// Removes callback `id` from `name` at `priority` (or the default).
    ///
    /// Returns whether it was registered there. A hook left without
    /// callbacks is dropped from the table, or once its fire ends if it is
    /// being fired.
    pub fn remove_filter(&self, name: &str, id: &str, priority: Option<i64>) -> bool {
        let Some(hook) = self.hook(name) else {
            return false;
        };

        let removed = hook.remove(id, priority.unwrap_or(self.config.default_priority));
        self.prune(name, &hook);
        removed
    }

    /// Removes every callback on `name`, or only those at `priority`.
    ///
    /// Returns whether the hook existed.
    pub fn remove_all_filters(&self, name: &str, priority: Option<i64>) -> bool {
        let Some(hook) = self.hook(name) else {
            return false;
        };

        hook.remove_all(priority);
        self.prune(name, &hook);
        true
    }

    /// Returns the lowest priority at which `id` is registered on `name`.
    pub fn has_filter(&self, name: &str, id: &str) -> Option<i64> {
        self.hook(name).and_then(|hook| hook.has_callback(id))
    }

    /// Returns whether `id` is registered on `name` at exactly `priority`.
    pub fn has_filter_at(&self, name: &str, id: &str, priority: i64) -> bool {
        self.hook(name)
            .is_some_and(|hook| hook.has_callback_at(id, priority))
    }

    /// Returns whether `name` has any callback.
    pub fn has_filters(&self, name: &str) -> bool {
        self.hook(name).is_some_and(|hook| hook.has_callbacks())
    }

    /// Filters `value` through the callbacks on `name`.
    pub fn apply_filters(&self, name: &str, value: Value, extra: &[Value]) -> Value {
        let Some(hook) = self.hook(name) else {
            return value;
        };

        let filtered = {
            let _firing = self.enter(name);
            hook.apply_filters(value, extra)
        };
        self.prune(name, &hook);
        filtered
    }

    /// Runs the callbacks on `name` as an action.
    ///
    /// The action counter is bumped even when nothing is registered.
    pub fn do_action(&self, name: &str, args: &[Value]) {
        *self.actions.borrow_mut().entry(name.to_string()).or_default() += 1;

        let Some(hook) = self.hook(name) else {
            return;
        };

        {
            let _firing = self.enter(name);
            hook.do_action(args);
        }
        self.prune(name, &hook);
    }

    /// Number of times action `name` has been fired.
    pub fn did_action(&self, name: &str) -> u64 {
        self.actions.borrow().get(name).copied().unwrap_or(0)
    }

    /// Name of the innermost hook being fired.
    pub fn current_filter(&self) -> Option<String> {
        self.current.borrow().last().cloned()
    }

    /// Returns whether `name` is being fired, or with `None`, whether any
    /// hook is.
    pub fn doing_filter(&self, name: Option<&str>) -> bool {
        let current = self.current.borrow();
        match name {
            Some(name) => current.iter().any(|n| n == name),
            None => !current.is_empty(),
        }
    }

    /// Returns the registry for `name`.
    pub fn hook(&self, name: &str) -> Option<Rc<Hook>> {
        self.hooks.borrow().get(name).cloned()
    }

    /// Names of all hooks in the table, sorted.
    pub fn hook_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.hooks.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Lists every registration, by hook name then firing order.
    pub fn registrations(&self) -> Vec<RegistrationInfo> {
        self.hook_names()
            .into_iter()
            .filter_map(|name| self.hook(&name).map(|hook| (name, hook)))
            .flat_map(|(name, hook)| hook.registrations(&name))
            .collect()
    }

    /// Drops `hook` from the table once it is empty and no pass over it is
    /// active. An outer fire of the same hook prunes it when it unwinds.
    fn prune(&self, name: &str, hook: &Rc<Hook>) {
        if hook.has_callbacks() || hook.is_firing() {
            return;
        }

        let mut hooks = self.hooks.borrow_mut();
        if hooks.get(name).is_some_and(|entry| Rc::ptr_eq(entry, hook)) {
            hooks.remove(name);
            debug!(hook = %name, "Dropped empty hook");
        }
    }

    fn enter(&self, name: &str) -> FiringGuard<'_> {
        self.current.borrow_mut().push(name.to_string());
        FiringGuard { table: self }
    }
}

/// Pops the current hook name when a fire ends.
struct FiringGuard<'a> {
    table: &'a HookTable,
}

impl Drop for FiringGuard<'_> {
    fn drop(&mut self) {
        self.table.current.borrow_mut().pop();
    }
}
