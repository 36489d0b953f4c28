//! Bounding box computation.
//!
//! The walk keeps two positions: `current`, where the next character will be
//! rendered, and `left_of_current`, the last character rendered so far
//! (starting at the `(1, 0)` sentinel). Entering the target captures
//! `current` as the top-left corner. Leaving it captures `left_of_current`
//! as the bottom-right corner, after which the walk stops.
//!
//! Anonymous text inside the target shares the target's path, so the match
//! is pinned to the outermost item that entered it (by walk depth) and only
//! that item's exit closes the box.

use crate::locate::tracker::{path_matches, PathStrategy, PathTracker};
use crate::position::{BoundingBox, Position};
use crate::tree::text::{column_width, is_newline, split_on_newlines};
use crate::tree::{Item, KeyRef, Node, RenderKey, Walk};

pub struct BoundingBoxFinder<'p> {
    target_path: &'p [RenderKey],
    current: Position,
    left_of_current: Position,
    top_left: Option<Position>,
    bottom_right: Option<Position>,
    depth: usize,
    matched_depth: Option<usize>,
    consumed_in_target: bool,
}

impl<'p> BoundingBoxFinder<'p> {
    /// Finder for the node at `target_path`; the empty path is the whole tree.
    pub fn new(target_path: &'p [RenderKey]) -> Self {
        Self {
            target_path,
            current: Position::start(),
            left_of_current: Position::new(1, 0),
            top_left: None,
            bottom_right: None,
            depth: 0,
            matched_depth: None,
            consumed_in_target: false,
        }
    }

    /// Bounding box of the target, or `None` if the walk never entered it.
    pub fn compute(self, tree: &Node) -> Option<BoundingBox> {
        let finder = PathTracker::new(self).run(tree);
        match (finder.top_left, finder.bottom_right) {
            (Some(top_left), Some(bottom_right)) => Some(BoundingBox::new(top_left, bottom_right)),
            _ => None,
        }
    }

    fn found(&self) -> bool {
        self.matched_depth.is_some()
    }

    fn consume(&mut self, text: &str) {
        for run in split_on_newlines(text) {
            if is_newline(run) {
                self.current.advance_line();
            } else if !run.is_empty() {
                self.current.advance_columns(column_width(run));
                self.left_of_current = self.current.left();
                if self.found() {
                    self.consumed_in_target = true;
                }
            }
        }
    }
}

impl<'t> PathStrategy<'t> for BoundingBoxFinder<'_> {
    fn on_enter(&mut self, path: &[KeyRef<'t>], item: Item<'t>) -> Walk {
        self.depth += 1;

        if !self.found() && path_matches(path, self.target_path) {
            self.top_left = Some(self.current);
            self.matched_depth = Some(self.depth);
        }

        if let Item::Constant(text) = item {
            self.consume(text);
        }

        Walk::Continue
    }

    fn on_exit(&mut self, _path: &[KeyRef<'t>], _item: Item<'t>) -> Walk {
        let closing = self.matched_depth == Some(self.depth) && self.bottom_right.is_none();
        self.depth -= 1;

        if !closing {
            return Walk::Continue;
        }

        // A target that rendered no characters collapses onto its entry point.
        self.bottom_right = if self.consumed_in_target {
            Some(self.left_of_current)
        } else {
            self.top_left
        };
        tracing::trace!(
            top_left = ?self.top_left,
            bottom_right = ?self.bottom_right,
            "closed bounding box"
        );
        Walk::Stop
    }
}
