//! Position to path resolution.
//!
//! Walks the tree keeping a cursor on the character about to be rendered.
//! Every leaf is split into text runs and newline markers; the first text
//! run whose half-open column range `[cursor, cursor + width)` holds the
//! target on the target line wins. Passing the end of the target line ends
//! the search without a match.

use crate::locate::tracker::{to_tree_path, PathStrategy, PathTracker};
use crate::position::Position;
use crate::tree::text::{column_width, is_newline, split_on_newlines};
use crate::tree::{KeyRef, Node, TreePath, Walk};

pub struct PositionFinder {
    target: Position,
    current: Position,
    found_path: Option<TreePath>,
}

impl PositionFinder {
    pub fn new(target: Position) -> Self {
        Self {
            target,
            current: Position::start(),
            found_path: None,
        }
    }

    /// Path to the node whose rendered text covers the target.
    pub fn find(self, tree: &Node) -> Option<TreePath> {
        PathTracker::new(self).run(tree).found_path
    }

    fn is_on_target(&self, width: i64) -> bool {
        self.target.line == self.current.line
            && self.target.column >= self.current.column
            && self.target.column < self.current.column + width
    }
}

impl<'t> PathStrategy<'t> for PositionFinder {
    fn on_leaf(&mut self, path: &[KeyRef<'t>], text: &'t str) -> Walk {
        for run in split_on_newlines(text) {
            if is_newline(run) {
                self.current.advance_line();
                if self.current.line > self.target.line {
                    tracing::trace!(wanted = %self.target, "passed target line");
                    return Walk::Stop;
                }
            } else {
                let width = column_width(run);
                if self.is_on_target(width) {
                    self.found_path = Some(to_tree_path(path));
                    return Walk::Stop;
                }
                self.current.advance_columns(width);
            }
        }

        Walk::Continue
    }
}
