//! Property tests over randomly shaped trees

use fst_locator::{
    node_to_bounding_box, path_to_bounding_box, position_to_path, Composite, Node, Position,
    RenderKey, Slot, TreePath,
};
use proptest::prelude::*;

fn arb_tree() -> impl Strategy<Value = Node> {
    let leaf = "[a-z =]{0,3}(\n)?".prop_map(Node::constant);

    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|items: Vec<Node>| Node::list(items)),
            (
                prop::collection::vec((inner, "[ ,\n]{0,2}"), 0..4),
                "[a-z]{0,2}",
            )
                .prop_map(|(fields, prefix)| {
                    let mut composite = Composite::new("node").text(prefix);
                    for (i, (value, separator)) in fields.into_iter().enumerate() {
                        composite = composite.field(format!("f{i}"), value).unwrap().text(separator);
                    }
                    Node::from(composite)
                }),
        ]
    })
}

/// Every path in `node`, root first.
fn all_paths(node: &Node, prefix: &mut TreePath, out: &mut Vec<TreePath>) {
    out.push(prefix.clone());
    match node {
        Node::Constant(_) => {}
        Node::List(items) => {
            for (index, item) in items.iter().enumerate() {
                let mut child = prefix.clone();
                child.push(RenderKey::Index(index));
                all_paths(item, &mut child, out);
            }
        }
        Node::Composite(composite) => {
            for slot in composite.children() {
                if let Slot::Field { key, value } = slot {
                    let mut child = prefix.clone();
                    child.push(RenderKey::Name(key.clone()));
                    all_paths(value, &mut child, out);
                }
            }
        }
    }
}

/// Position of every character of `text`, newlines marked.
fn char_positions(text: &str) -> Vec<(Position, bool)> {
    let mut pos = Position::start();
    let mut out = Vec::new();
    for ch in text.chars() {
        let newline = ch == '\n';
        out.push((pos, newline));
        if newline {
            pos.advance_line();
        } else {
            pos.advance_columns(1);
        }
    }
    out
}

proptest! {
    #[test]
    fn every_character_is_owned_by_a_box_containing_it(tree in arb_tree()) {
        let text = tree.render();

        for (pos, newline) in char_positions(&text) {
            let found = position_to_path(&tree, pos.line, pos.column);
            if newline {
                prop_assert_eq!(found, None);
                continue;
            }

            let path = found.expect("every non-newline character has an owner");
            let bbox = path_to_bounding_box(&tree, &path).unwrap();
            prop_assert!(bbox.contains(pos), "{} not in {} for `{}`", pos, bbox, path);
        }
    }

    #[test]
    fn positions_past_the_end_find_nothing(tree in arb_tree(), column in 1i64..6) {
        let lines = char_positions(&tree.render())
            .last()
            .map_or(1, |(pos, newline)| if *newline { pos.line + 1 } else { pos.line });
        prop_assert_eq!(position_to_path(&tree, lines + 1, column), None);
    }

    #[test]
    fn boxes_are_ordered(tree in arb_tree()) {
        let mut paths = Vec::new();
        all_paths(&tree, &mut TreePath::root(), &mut paths);

        let whole = node_to_bounding_box(&tree);
        prop_assert_eq!(whole.top_left, Position::start());

        for path in &paths {
            let bbox = path_to_bounding_box(&tree, path).unwrap();
            prop_assert!(bbox.top_left <= bbox.bottom_right, "{} for `{}`", bbox, path);
            prop_assert!(bbox.top_left.is_non_negative());
            prop_assert!(whole.top_left <= bbox.top_left);
        }
    }

    #[test]
    fn lookups_are_idempotent(tree in arb_tree(), line in 1i64..4, column in 1i64..6) {
        prop_assert_eq!(
            position_to_path(&tree, line, column),
            position_to_path(&tree, line, column)
        );

        let mut paths = Vec::new();
        all_paths(&tree, &mut TreePath::root(), &mut paths);
        for path in &paths {
            prop_assert_eq!(
                path_to_bounding_box(&tree, path),
                path_to_bounding_box(&tree, path)
            );
        }
    }
}
