//! Firing order and lookup across priorities.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use hookline_hooks::{Callback, CallbackId, Hook};

use crate::helpers::{Trace, noop};

#[test]
fn test_lower_priority_fires_first_regardless_of_registration_order() {
    let trace = Trace::new();
    let hook = Hook::new();
    hook.add(trace.recorder("A"), 10, 1);
    hook.add(trace.recorder("B"), 5, 1);
    hook.add(trace.recorder("C"), 10, 1);

    hook.do_action(&[]);
    assert_eq!(trace.entries(), vec!["B", "A", "C"]);
}

#[test]
fn test_overwrite_keeps_bucket_position() {
    let trace = Trace::new();
    let hook = Hook::new();
    hook.add(trace.recorder("A"), 10, 1);
    hook.add(trace.recorder("B"), 10, 1);
    hook.add(trace.recorder("A"), 10, 3);

    hook.do_action(&[]);
    assert_eq!(trace.entries(), vec!["A", "B"]);
    assert_eq!(hook.len(), 2);
    assert_eq!(hook.accepted_args("A", 10), Some(3));
}

#[test]
fn test_has_callback_reports_lowest_current_priority() {
    let hook = Hook::new();
    let sequences: &[&[i64]] = &[&[10], &[10, 3, 7], &[-5, 0, 5], &[100, 99, 100]];

    for priorities in sequences {
        for &priority in *priorities {
            hook.add(noop("cb"), priority, 1);
        }
        let lowest = priorities.iter().copied().min();
        assert_eq!(hook.has_callback("cb"), lowest);

        for &priority in *priorities {
            hook.remove("cb", priority);
        }
        assert_eq!(hook.has_callback("cb"), None);
        assert!(!hook.has_callbacks());
    }
}

#[test]
fn test_priorities_stay_sorted_and_unique() {
    let hook = Hook::new();
    for (id, priority) in [("a", 30), ("b", -1), ("c", 30), ("d", 0), ("e", 7)] {
        hook.add(noop(id), priority, 1);
    }
    assert_eq!(hook.priorities(), vec![-1, 0, 7, 30]);
    assert_eq!(hook.callbacks_at(30), vec![CallbackId::from("a"), CallbackId::from("c")]);
}

#[test]
fn test_filter_receives_clamped_arguments() {
    let hook = Hook::new();
    hook.add(
        Callback::new("count_args", |_, args| json!(args.len())),
        10,
        2,
    );
    hook.add(
        Callback::new("add_extra", |_, args| {
            let count = args[0].as_u64().unwrap_or_default();
            let extra = args.get(2).and_then(Value::as_u64).unwrap_or_default();
            json!(count + extra)
        }),
        20,
        10,
    );

    // count_args sees (value, 1) -> 2; add_extra sees (2, 1, 40) -> 42.
    let result = hook.apply_filters(json!("value"), &[json!(1), json!(40)]);
    assert_eq!(result, json!(42));
}
