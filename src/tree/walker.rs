//! Depth-first render walk over a lossless tree.
//!
//! The walk visits the root and then every descendant in source order, so
//! the constants it reaches concatenate to the rendered text. Visitors hook
//! into the walk through [`RenderVisitor`] and may stop it from any hook.

use crate::tree::node::{Composite, KeyRef, Node, Slot};

/// Whether the walk should go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Walk {
    Continue,
    Stop,
}

impl Walk {
    pub fn is_stop(self) -> bool {
        self == Walk::Stop
    }

    /// `Stop` if either side asked to stop.
    pub fn or(self, other: Walk) -> Walk {
        if self.is_stop() || other.is_stop() {
            Walk::Stop
        } else {
            Walk::Continue
        }
    }
}

/// Category of a walked item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Constant,
    List,
    Node,
}

/// An item reached by the walk.
#[derive(Debug, Clone, Copy)]
pub enum Item<'t> {
    /// Leaf text, either a constant node or anonymous composite text.
    Constant(&'t str),
    List(&'t [Node]),
    Node(&'t Composite),
}

impl<'t> Item<'t> {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Constant(_) => ItemKind::Constant,
            Item::List(_) => ItemKind::List,
            Item::Node(_) => ItemKind::Node,
        }
    }
}

impl<'t> From<&'t Node> for Item<'t> {
    fn from(node: &'t Node) -> Self {
        match node {
            Node::Constant(text) => Item::Constant(text),
            Node::List(items) => Item::List(items),
            Node::Composite(composite) => Item::Node(composite),
        }
    }
}

/// Hooks called during a render walk.
///
/// `key` is the render key the item is reachable under from its parent, or
/// `None` for the root and for anonymous composite text.
///
/// `after` is called for every item whose `before` was called, including
/// when the walk is stopping.
pub trait RenderVisitor<'t> {
    fn before(&mut self, _item: Item<'t>, _key: Option<KeyRef<'t>>) -> Walk {
        Walk::Continue
    }

    /// Called for constants, after `before`.
    fn before_leaf(&mut self, _text: &'t str, _key: Option<KeyRef<'t>>) -> Walk {
        Walk::Continue
    }

    fn after(&mut self, _item: Item<'t>, _key: Option<KeyRef<'t>>) -> Walk {
        Walk::Continue
    }
}

/// Walk `root` depth-first in source order.
pub fn walk<'t, V>(root: &'t Node, visitor: &mut V) -> Walk
where
    V: RenderVisitor<'t> + ?Sized,
{
    walk_item(Item::from(root), None, visitor)
}

fn walk_item<'t, V>(item: Item<'t>, key: Option<KeyRef<'t>>, visitor: &mut V) -> Walk
where
    V: RenderVisitor<'t> + ?Sized,
{
    let mut flow = visitor.before(item, key);

    if !flow.is_stop() {
        flow = match item {
            Item::Constant(text) => visitor.before_leaf(text, key),
            Item::List(items) => walk_list(items, visitor),
            Item::Node(composite) => walk_composite(composite, visitor),
        };
    }

    visitor.after(item, key).or(flow)
}

fn walk_list<'t, V>(items: &'t [Node], visitor: &mut V) -> Walk
where
    V: RenderVisitor<'t> + ?Sized,
{
    for (index, node) in items.iter().enumerate() {
        if walk_item(Item::from(node), Some(KeyRef::Index(index)), visitor).is_stop() {
            return Walk::Stop;
        }
    }
    Walk::Continue
}

fn walk_composite<'t, V>(composite: &'t Composite, visitor: &mut V) -> Walk
where
    V: RenderVisitor<'t> + ?Sized,
{
    for slot in composite.children() {
        let flow = match slot {
            Slot::Text(text) => walk_item(Item::Constant(text), None, visitor),
            Slot::Field { key, value } => {
                walk_item(Item::from(value), Some(KeyRef::Name(key)), visitor)
            }
        };
        if flow.is_stop() {
            return Walk::Stop;
        }
    }
    Walk::Continue
}
