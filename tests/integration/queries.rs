//! Batch query files loaded from disk

use super::two_assignments;
use fst_locator::config::{load_from_path, run_queries, ConfigError, QueryOutcome, Resolution};
use std::fs;
use tempfile::TempDir;

fn write_queries(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("queries.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn runs_query_file_against_tree() {
    let dir = TempDir::new().unwrap();
    let path = write_queries(
        &dir,
        r#"
[meta]
name = "assignments"
description = "Cursor and span checks for two statements"

[[queries]]
id = "second-value"
target = { type = "position", line = 2, column = 5 }
expect = { path = "2.value.value", kind = "constant" }

[[queries]]
id = "second-statement"
[queries.target]
type = "bounding-box"
path = "2"
[queries.expect]
top_left = [2, 1]
bottom_right = [2, 5]

[[queries]]
id = "past-end"
target = { type = "position", line = 3, column = 1 }
expect = { none = true }
"#,
    );

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.meta.name, "assignments");

    let outcomes = run_queries(&two_assignments(), &config);
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(QueryOutcome::is_success), "{outcomes:?}");

    let ids: Vec<_> = outcomes.iter().map(QueryOutcome::id).collect();
    assert_eq!(ids, ["second-value", "second-statement", "past-end"]);
    assert!(matches!(
        &outcomes[2],
        QueryOutcome::Resolved {
            resolution: Resolution::Nothing,
            ..
        }
    ));
}

#[test]
fn failures_do_not_stop_the_batch() {
    let dir = TempDir::new().unwrap();
    let path = write_queries(
        &dir,
        r#"
[[queries]]
id = "typo"
target = { type = "bounding-box", path = "0.valu" }

[[queries]]
id = "wrong-corner"
target = { type = "bounding-box", path = "0" }
expect = { bottom_right = [1, 4] }

[[queries]]
id = "whole"
target = { type = "bounding-box" }
expect = { top_left = [1, 1], bottom_right = [2, 5] }
"#,
    );

    let config = load_from_path(&path).unwrap();
    let outcomes = run_queries(&two_assignments(), &config);

    match &outcomes[0] {
        QueryOutcome::Failed { reason, .. } => assert!(reason.contains("did you mean `value`")),
        other => panic!("unexpected outcome: {other}"),
    }
    assert!(matches!(&outcomes[1], QueryOutcome::Mismatch { .. }));
    assert!(outcomes[2].is_success());
}

#[test]
fn invalid_file_names_its_path() {
    let dir = TempDir::new().unwrap();
    let path = write_queries(
        &dir,
        r#"
[[queries]]
id = "bad"
target = { type = "position", line = 1, column = 0 }
"#,
    );

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }));
    assert!(err.to_string().contains("queries.toml"));
}
