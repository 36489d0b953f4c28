//! Lossless syntax trees and their render walk.
//!
//! A tree renders back to the exact text it was built from. Nodes are
//! constants (leaf text), lists (children addressed by index) or composites
//! (anonymous text plus children addressed by field name).

pub mod errors;
pub mod node;
pub mod path;
pub mod text;
pub mod walker;

pub use errors::TreeError;
pub use node::{child_by_key, load_tree, Composite, KeyRef, Node, RenderKey, Slot};
pub use path::TreePath;
pub use text::{is_newline, split_on_newlines};
pub use walker::{walk, Item, ItemKind, RenderVisitor, Walk};
