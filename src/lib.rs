//! FST Locator: cursor positions and structural paths over lossless syntax trees
//!
//! Editors and refactoring tools think in two coordinate systems: a cursor
//! at a line and column, and a structural path of child keys from the tree
//! root. This crate maps between them.
//!
//! # Architecture
//!
//! Every query is one depth-first render walk ([`tree::walk`]) that visits
//! leaves in source order. [`locate::PathTracker`] layers a live path stack
//! on the walk and hands each hook to a [`locate::PathStrategy`]; the two
//! strategies are [`locate::PositionFinder`] (position to path) and
//! [`locate::BoundingBoxFinder`] (path to text span). Both stop the walk as
//! soon as their answer is known.
//!
//! # Guarantees
//!
//! - Positions and columns are 1-indexed; columns count characters
//! - A position outside the rendered text resolves to `None`, never an error
//! - Bounding boxes are inclusive; an empty node has a zero-width box
//! - The tree is never mutated; query state is local to one call
//!
//! # Example
//!
//! ```
//! use fst_locator::{path_to_bounding_box, position_to_path, Composite, Node, TreePath};
//!
//! let tree = Node::list([
//!     Composite::new("assignment")
//!         .field("target", "a")
//!         .unwrap()
//!         .text(" = ")
//!         .field("value", "1")
//!         .unwrap()
//!         .into(),
//!     Node::constant("\n"),
//! ]);
//!
//! let path = position_to_path(&tree, 1, 5).unwrap();
//! assert_eq!(path.to_string(), "0.value");
//!
//! let bbox = path_to_bounding_box(&tree, &TreePath::parse("0").unwrap()).unwrap();
//! assert_eq!(bbox.top_left, (1, 1));
//! assert_eq!(bbox.bottom_right, (1, 5));
//! ```

pub mod config;
pub mod locate;
pub mod position;
pub mod tree;

// Re-exports
pub use config::{
    load_from_path, load_from_str, run_queries, ConfigError, QueryConfig, QueryOutcome,
    Resolution,
};
pub use locate::{
    node_to_bounding_box, path_to_bounding_box, path_to_node, position_to_node,
    position_to_path, LocateError,
};
pub use position::{BoundingBox, Position};
pub use tree::{
    child_by_key, load_tree, Composite, KeyRef, Node, RenderKey, Slot, TreeError, TreePath,
};
