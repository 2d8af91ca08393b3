//! Hook plans — build a [`HookTable`] from configuration and fire it.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use hookline_core::config::AppConfig;
use hookline_core::config::plan::{FireConfig, FireMode};
use hookline_core::error::AppError;
use hookline_core::result::AppResult;

use crate::hooks::builtins;
use crate::hooks::table::HookTable;

/// Result of one fire from a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FireOutcome {
    /// The hook that was fired.
    pub hook: String,
    /// Filter or action.
    pub mode: FireMode,
    /// Callbacks registered on the hook when it was fired.
    pub callbacks: usize,
    /// Filtered value; `null` for actions.
    pub result: Value,
}

/// Builds a table from the registrations in `config`.
///
/// Fails on the first registration naming an empty hook or an unknown
/// builtin callback.
pub fn build_table(config: &AppConfig) -> AppResult<HookTable> {
    let table = HookTable::with_config(config.hooks);

    for (index, registration) in config.registrations.iter().enumerate() {
        if registration.hook.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Registration #{} has an empty hook name",
                index + 1
            )));
        }

        let callback = builtins::resolve(&registration.callback)?;
        table.add_filter(
            &registration.hook,
            callback,
            registration.priority,
            registration.accepted_args,
        );
    }

    info!(
        hooks = table.hook_names().len(),
        registrations = config.registrations.len(),
        "Hook plan registered"
    );

    Ok(table)
}

/// Fires each entry of `fires` against `table`, in order.
pub fn run_fires(table: &HookTable, fires: &[FireConfig]) -> Vec<FireOutcome> {
    fires
        .iter()
        .map(|fire| {
            let callbacks = table.hook(&fire.hook).map_or(0, |hook| hook.len());
            if callbacks == 0 {
                warn!(hook = %fire.hook, "Firing hook with no callbacks");
            }

            let result = match fire.mode {
                FireMode::Filter => {
                    let (value, extra) = match fire.args.split_first() {
                        Some((value, extra)) => (value.clone(), extra),
                        None => (Value::Null, &[][..]),
                    };
                    table.apply_filters(&fire.hook, value, extra)
                }
                FireMode::Action => {
                    table.do_action(&fire.hook, &fire.args);
                    Value::Null
                }
            };

            debug!(hook = %fire.hook, mode = %fire.mode, callbacks, "Hook fired");

            FireOutcome {
                hook: fire.hook.clone(),
                mode: fire.mode,
                callbacks,
                result,
            }
        })
        .collect()
}
