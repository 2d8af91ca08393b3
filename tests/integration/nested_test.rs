//! Re-entrant fires of the same hook.

use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use serde_json::Value;

use hookline_hooks::{Callback, Hook};

use crate::helpers::Trace;

#[test]
fn test_inner_fire_does_not_move_outer_cursor() {
    let trace = Trace::new();
    let hook = Hook::new();
    let depth = Rc::new(Cell::new(0));

    let inner_trace = trace.clone();
    let guard = Rc::clone(&depth);
    hook.add(
        Callback::new("A", move |hook, _| {
            inner_trace.push(format!("A@{}", hook.nesting_level()));
            if guard.get() == 0 {
                guard.set(1);
                hook.do_action(&[]);
            }
            Value::Null
        }),
        10,
        1,
    );

    let b_trace = trace.clone();
    hook.add(
        Callback::new("B", move |hook, _| {
            b_trace.push(format!("B@{}:{:?}", hook.nesting_level(), hook.current_priority()));
            Value::Null
        }),
        20,
        1,
    );

    hook.do_action(&[]);
    assert_eq!(
        trace.entries(),
        vec!["A@1", "A@2", "B@2:Some(20)", "B@1:Some(20)"]
    );
    assert_eq!(hook.nesting_level(), 0);
}

#[test]
fn test_remove_all_in_inner_fire_halts_outer_pass() {
    let trace = Trace::new();
    let hook = Hook::new();
    let fired_inner = Rc::new(Cell::new(false));

    let flag = Rc::clone(&fired_inner);
    let a_trace = trace.clone();
    hook.add(
        Callback::new("A", move |hook, _| {
            a_trace.push("A");
            if !flag.replace(true) {
                hook.do_action(&[]);
            }
            Value::Null
        }),
        1,
        1,
    );
    hook.add(trace.recorder_with("wipe", |hook| hook.remove_all(None)), 2, 1);
    hook.add(trace.recorder("C"), 3, 1);

    hook.do_action(&[]);
    assert_eq!(trace.entries(), vec!["A", "A", "wipe"]);
    assert!(!hook.has_callbacks());
}

#[test]
fn test_current_priority_restored_after_inner_fire() {
    let observed = Rc::new(std::cell::RefCell::new(Vec::new()));
    let hook = Hook::new();
    let once = Rc::new(Cell::new(false));

    let sink = Rc::clone(&observed);
    let flag = Rc::clone(&once);
    hook.add(
        Callback::new("outer", move |hook, _| {
            if !flag.replace(true) {
                hook.do_action(&[]);
                sink.borrow_mut().push(hook.current_priority());
            }
            Value::Null
        }),
        3,
        1,
    );
    hook.add(Callback::new("tail", |_, _| Value::Null), 8, 1);

    hook.do_action(&[]);
    assert_eq!(*observed.borrow(), vec![Some(3)]);
}

#[test]
fn test_panicking_callback_releases_cursor() {
    let hook = Hook::new();
    hook.add(Callback::new("boom", |_, _| panic!("callback failed")), 10, 1);

    let result = catch_unwind(AssertUnwindSafe(|| hook.do_action(&[])));
    assert!(result.is_err());
    assert!(!hook.is_firing());
    assert_eq!(hook.current_priority(), None);
    assert!(hook.has_callback_at("boom", 10));
}
