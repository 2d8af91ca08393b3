//! Loading and running a hook plan from a configuration file.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use hookline_core::ErrorKind;
use hookline_core::config::AppConfig;
use hookline_core::config::plan::FireMode;
use hookline_hooks::{build_table, run_fires};

use crate::helpers::fixture;

#[test]
fn test_fixture_plan_runs() {
    let config = AppConfig::load_from(fixture("plan.toml")).expect("fixture loads");
    assert_eq!(config.logging.level, "warn");

    let table = build_table(&config).expect("plan is valid");
    assert_eq!(table.has_filter("the_content", "__return_zero"), Some(5));
    assert_eq!(table.has_filter("shutdown", "__return_null"), Some(10));

    let outcomes = run_fires(&table, &config.fire);
    assert_eq!(outcomes.len(), 2);

    // __return_zero (5) -> identity (10) -> __return_empty_array (20).
    assert_eq!(outcomes[0].mode, FireMode::Filter);
    assert_eq!(outcomes[0].callbacks, 3);
    assert_eq!(outcomes[0].result, json!([]));

    assert_eq!(outcomes[1].mode, FireMode::Action);
    assert_eq!(outcomes[1].result, Value::Null);
    assert_eq!(table.did_action("shutdown"), 1);
}

#[test]
fn test_unknown_callback_in_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        "[[registrations]]\nhook = \"evt\"\ncallback = \"wp_die\"\n",
    )
    .expect("write plan");

    let config = AppConfig::load_from(&path).expect("file parses");
    let err = build_table(&config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(err.message.contains("wp_die"));
}

#[test]
fn test_malformed_file_is_configuration_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[[registrations]]\nhook = 3\n").expect("write plan");

    let err = AppConfig::load_from(&path).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}
