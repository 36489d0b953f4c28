//! Path tracking layered on top of the render walk.
//!
//! [`PathTracker`] keeps a stack of render keys that always equals the path
//! of the item being processed, and forwards each hook to a
//! [`PathStrategy`] together with that path.

use crate::tree::{walk, Item, KeyRef, Node, RenderKey, RenderVisitor, TreePath, Walk};

/// Resolver-specific behaviour run inside a path-tracking walk.
///
/// `path` is the path to the item the hook is about: on entry and exit the
/// item's own key is already on the stack, and leaf hooks see the path of
/// the leaf itself.
pub trait PathStrategy<'t> {
    fn on_enter(&mut self, _path: &[KeyRef<'t>], _item: Item<'t>) -> Walk {
        Walk::Continue
    }

    fn on_leaf(&mut self, _path: &[KeyRef<'t>], _text: &'t str) -> Walk {
        Walk::Continue
    }

    fn on_exit(&mut self, _path: &[KeyRef<'t>], _item: Item<'t>) -> Walk {
        Walk::Continue
    }
}

pub struct PathTracker<'t, S> {
    current_path: Vec<KeyRef<'t>>,
    strategy: S,
}

impl<'t, S: PathStrategy<'t>> PathTracker<'t, S> {
    pub fn new(strategy: S) -> Self {
        Self {
            current_path: Vec::new(),
            strategy,
        }
    }

    /// Walk `tree` and hand back the strategy with its results.
    pub fn run(mut self, tree: &'t Node) -> S {
        let _ = walk(tree, &mut self);
        debug_assert!(self.current_path.is_empty(), "unbalanced path stack");
        self.strategy
    }
}

impl<'t, S: PathStrategy<'t>> RenderVisitor<'t> for PathTracker<'t, S> {
    fn before(&mut self, item: Item<'t>, key: Option<KeyRef<'t>>) -> Walk {
        if let Some(key) = key {
            self.current_path.push(key);
        }
        self.strategy.on_enter(&self.current_path, item)
    }

    fn before_leaf(&mut self, text: &'t str, _key: Option<KeyRef<'t>>) -> Walk {
        self.strategy.on_leaf(&self.current_path, text)
    }

    fn after(&mut self, item: Item<'t>, key: Option<KeyRef<'t>>) -> Walk {
        let flow = self.strategy.on_exit(&self.current_path, item);
        if key.is_some() {
            self.current_path.pop();
        }
        flow
    }
}

/// Whether a live path equals `target`.
pub fn path_matches(path: &[KeyRef<'_>], target: &[RenderKey]) -> bool {
    path.len() == target.len() && path.iter().zip(target).all(|(key, want)| key == want)
}

/// Owned copy of a live path.
pub fn to_tree_path(path: &[KeyRef<'_>]) -> TreePath {
    path.iter().map(|key| key.to_render_key()).collect()
}
