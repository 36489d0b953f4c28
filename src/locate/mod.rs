//! Mapping between cursor positions and structural paths.
//!
//! Both directions run a single depth-first render walk that tracks the
//! current path and a text cursor, and stop as soon as the answer is known.
//! All state is local to one call, so queries against a shared tree can run
//! from several threads at once.

pub mod bbox;
pub mod errors;
pub mod finder;
pub mod tracker;

pub use bbox::BoundingBoxFinder;
pub use errors::LocateError;
pub use finder::PositionFinder;
pub use tracker::{PathStrategy, PathTracker};

use crate::position::{BoundingBox, Position};
use crate::tree::{Node, TreeError, TreePath};

/// Path to the node rendered at `line`, `column` (both 1-indexed).
///
/// Returns `None` when the position is outside the rendered text: before
/// the start, past the end, or past the end of its line (newlines belong to
/// no node).
pub fn position_to_path(tree: &Node, line: i64, column: i64) -> Option<TreePath> {
    let target = Position::new(line, column);
    let found = PositionFinder::new(target).find(tree);
    tracing::debug!(
        %target,
        path = ?found.as_ref().map(ToString::to_string),
        "position lookup"
    );
    found
}

/// Node at `path`, or `None` when no path is given.
///
/// A path that does not exist in `tree` is an error.
pub fn path_to_node<'t>(
    tree: &'t Node,
    path: Option<&TreePath>,
) -> Result<Option<&'t Node>, TreeError> {
    match path {
        Some(path) => tree.descend(path).map(Some),
        None => Ok(None),
    }
}

/// Node rendered at `line`, `column`.
pub fn position_to_node(tree: &Node, line: i64, column: i64) -> Option<&Node> {
    let path = position_to_path(tree, line, column)?;
    // Paths produced by the walk always resolve.
    tree.descend(&path).ok()
}

/// Bounding box of everything `node` renders. The top-left corner is
/// always `(1, 1)`.
pub fn node_to_bounding_box(node: &Node) -> BoundingBox {
    // The root always matches the empty path, so the finder always yields a box.
    BoundingBoxFinder::new(&[]).compute(node).unwrap_or_default()
}

/// Bounding box of the node at `path` in `tree`, in the tree's coordinates.
pub fn path_to_bounding_box(tree: &Node, path: &TreePath) -> Result<BoundingBox, LocateError> {
    let bbox = BoundingBoxFinder::new(path.keys()).compute(tree);
    tracing::debug!(%path, bbox = ?bbox, "bounding box lookup");
    bbox.ok_or_else(|| LocateError::PathNotFound { path: path.clone() })
}
