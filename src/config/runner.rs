//! Batch query runner - resolves every query in a config against one tree
//!
//! Each query is resolved independently; a query that fails or does not
//! meet its expectation is reported and the batch carries on.

use crate::config::schema::{Expect, QueryConfig, QueryDefinition, Target};
use crate::locate::{path_to_bounding_box, position_to_path};
use crate::position::{BoundingBox, Position};
use crate::tree::{Node, TreePath};
use serde::Serialize;
use std::fmt;

/// What a query resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Resolution {
    /// A position resolved to the node at `path`.
    Node { path: TreePath, node_kind: String },
    /// A position outside the rendered text.
    Nothing,
    BoundingBox { bbox: BoundingBox },
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Node { path, node_kind } if path.is_root() => {
                write!(f, "<root> ({node_kind})")
            }
            Resolution::Node { path, node_kind } => write!(f, "{path} ({node_kind})"),
            Resolution::Nothing => write!(f, "no node"),
            Resolution::BoundingBox { bbox } => write!(f, "{bbox}"),
        }
    }
}

/// Result of running a single query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
#[must_use = "QueryOutcome should be checked for success/failure"]
pub enum QueryOutcome {
    /// Query resolved and met every expectation
    Resolved { id: String, resolution: Resolution },
    /// Query resolved to something other than what was expected
    Mismatch {
        id: String,
        resolution: Resolution,
        expected: String,
    },
    /// Query could not be resolved at all
    Failed { id: String, reason: String },
}

impl QueryOutcome {
    pub fn id(&self) -> &str {
        match self {
            QueryOutcome::Resolved { id, .. }
            | QueryOutcome::Mismatch { id, .. }
            | QueryOutcome::Failed { id, .. } => id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Resolved { .. })
    }
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutcome::Resolved { id, resolution } => write!(f, "{id}: {resolution}"),
            QueryOutcome::Mismatch {
                id,
                resolution,
                expected,
            } => write!(f, "{id}: got {resolution}, expected {expected}"),
            QueryOutcome::Failed { id, reason } => write!(f, "{id}: failed - {reason}"),
        }
    }
}

/// Run every query in `config` against `tree`, in order.
pub fn run_queries(tree: &Node, config: &QueryConfig) -> Vec<QueryOutcome> {
    config
        .queries
        .iter()
        .map(|query| {
            let outcome = run_query(tree, query);
            tracing::debug!(id = %query.id, success = outcome.is_success(), "query finished");
            outcome
        })
        .collect()
}

fn run_query(tree: &Node, query: &QueryDefinition) -> QueryOutcome {
    let id = query.id.clone();

    let resolution = match resolve(tree, &query.target) {
        Ok(resolution) => resolution,
        Err(reason) => return QueryOutcome::Failed { id, reason },
    };

    let default_expect = Expect::default();
    let expect = query.expect.as_ref().unwrap_or(&default_expect);

    match check(&resolution, expect) {
        Ok(()) => QueryOutcome::Resolved { id, resolution },
        Err(expected) => QueryOutcome::Mismatch {
            id,
            resolution,
            expected,
        },
    }
}

fn resolve(tree: &Node, target: &Target) -> Result<Resolution, String> {
    match target {
        Target::Position { line, column } => {
            let Some(path) = position_to_path(tree, *line, *column) else {
                return Ok(Resolution::Nothing);
            };
            let node = tree.descend(&path).map_err(|e| e.to_string())?;
            Ok(Resolution::Node {
                node_kind: node.kind_name().to_string(),
                path,
            })
        }
        Target::BoundingBox { path } => {
            let path = match path {
                Some(path) => TreePath::parse(path).map_err(|e| e.to_string())?,
                None => TreePath::root(),
            };
            match path_to_bounding_box(tree, &path) {
                Ok(bbox) => Ok(Resolution::BoundingBox { bbox }),
                // `descend` names the missing key and a close field name.
                Err(err) => Err(match tree.descend(&path) {
                    Err(missing) => missing.to_string(),
                    Ok(_) => err.to_string(),
                }),
            }
        }
    }
}

/// `Err` carries a description of the unmet expectation.
fn check(resolution: &Resolution, expect: &Expect) -> Result<(), String> {
    match resolution {
        Resolution::Nothing => {
            if expect.path.is_some() || expect.kind.is_some() {
                return Err(describe_node_expectation(expect));
            }
        }
        Resolution::Node { path, node_kind } => {
            if expect.none {
                return Err("no node".to_string());
            }
            if let Some(want) = &expect.path {
                if TreePath::parse(want).ok().as_ref() != Some(path) {
                    return Err(describe_node_expectation(expect));
                }
            }
            if let Some(want) = &expect.kind {
                if want != node_kind {
                    return Err(describe_node_expectation(expect));
                }
            }
        }
        Resolution::BoundingBox { bbox } => {
            let top_left_ok = expect
                .top_left
                .map_or(true, |[l, c]| bbox.top_left == Position::new(l, c));
            let bottom_right_ok = expect
                .bottom_right
                .map_or(true, |[l, c]| bbox.bottom_right == Position::new(l, c));
            if !top_left_ok || !bottom_right_ok {
                let show = |corner: Option<[i64; 2]>| match corner {
                    Some([l, c]) => format!("{l}:{c}"),
                    None => "*".to_string(),
                };
                return Err(format!(
                    "{}..{}",
                    show(expect.top_left),
                    show(expect.bottom_right)
                ));
            }
        }
    }
    Ok(())
}

fn describe_node_expectation(expect: &Expect) -> String {
    match (&expect.path, &expect.kind) {
        (Some(path), Some(kind)) => format!("{path} ({kind})"),
        (Some(path), None) => path.clone(),
        (None, Some(kind)) => format!("a {kind} node"),
        (None, None) => "a node".to_string(),
    }
}
