//! Position and bounding box lookups through the public API

use super::{assignment, two_assignments, TWO_ASSIGNMENTS_JSON};
use fst_locator::{
    node_to_bounding_box, path_to_bounding_box, path_to_node, position_to_node,
    position_to_path, BoundingBox, Composite, LocateError, Node, Position, TreeError, TreePath,
};

fn path(input: &str) -> TreePath {
    TreePath::parse(input).unwrap()
}

#[test]
fn json_tree_matches_built_tree() {
    let tree = Node::from_json_str(TWO_ASSIGNMENTS_JSON).unwrap();
    assert_eq!(tree, two_assignments());
    assert_eq!(tree.render(), "a = 1\nb = 2\n");
}

#[test]
fn positions_resolve_to_leaves() {
    let tree = two_assignments();

    assert_eq!(position_to_path(&tree, 1, 1), Some(path("0.target")));
    assert_eq!(position_to_path(&tree, 1, 5), Some(path("0.value.value")));
    assert_eq!(position_to_path(&tree, 2, 1), Some(path("2.target")));
    assert_eq!(position_to_path(&tree, 2, 5), Some(path("2.value.value")));

    let leaf = position_to_node(&tree, 2, 5).unwrap();
    assert_eq!(leaf, &Node::constant("2"));
}

#[test]
fn anonymous_text_resolves_to_enclosing_node() {
    let tree = two_assignments();

    for column in 2..=4 {
        assert_eq!(position_to_path(&tree, 1, column), Some(path("0")));
    }
    let node = position_to_node(&tree, 2, 3).unwrap();
    assert_eq!(node.kind_name(), "assignment");
}

#[test]
fn positions_outside_text_resolve_to_nothing() {
    let tree = two_assignments();

    // Newlines belong to no node.
    assert_eq!(position_to_path(&tree, 1, 6), None);
    assert_eq!(position_to_path(&tree, 1, 7), None);
    assert_eq!(position_to_path(&tree, 3, 1), None);
    assert_eq!(position_to_path(&tree, 0, 1), None);
    assert_eq!(position_to_path(&tree, 1, 0), None);
    assert_eq!(position_to_path(&tree, -4, -4), None);
    assert_eq!(position_to_node(&tree, 40, 2), None);
}

#[test]
fn statement_boxes() {
    let tree = two_assignments();

    let first = path_to_bounding_box(&tree, &path("0")).unwrap();
    assert_eq!(first, BoundingBox::new(Position::new(1, 1), Position::new(1, 5)));

    let second = path_to_bounding_box(&tree, &path("2")).unwrap();
    assert_eq!(second.top_left, (2, 1));
    assert_eq!(second.bottom_right, (2, 5));
    assert_eq!(second.line_span(), 1);

    let value = path_to_bounding_box(&tree, &path("2.value")).unwrap();
    assert_eq!(value.to_string(), "2:5..2:5");
}

#[test]
fn whole_tree_box_starts_at_origin() {
    let tree = two_assignments();

    let bbox = path_to_bounding_box(&tree, &TreePath::root()).unwrap();
    assert_eq!(bbox.top_left, (1, 1));
    assert_eq!(bbox.bottom_right, (2, 5));
    assert_eq!(node_to_bounding_box(&tree), bbox);
}

#[test]
fn node_box_uses_its_own_coordinates() {
    let tree = two_assignments();
    let second = path_to_node(&tree, Some(&path("2"))).unwrap().unwrap();

    let bbox = node_to_bounding_box(second);
    assert_eq!(bbox.top_left, (1, 1));
    assert_eq!(bbox.bottom_right, (1, 5));
}

#[test]
fn multi_line_node_box() {
    let tree = Node::list([
        Node::constant("x = [\n"),
        Composite::new("body")
            .text("  ")
            .field("first", "1,\n")
            .unwrap()
            .text("  ")
            .field("second", "22")
            .unwrap()
            .into(),
        Node::constant("\n]\n"),
    ]);

    let bbox = path_to_bounding_box(&tree, &path("1")).unwrap();
    assert_eq!(bbox.top_left, (2, 1));
    assert_eq!(bbox.bottom_right, (3, 4));
    assert_eq!(bbox.line_span(), 2);
    assert!(bbox.contains(Position::new(2, 80)));
    assert!(!bbox.contains(Position::new(3, 5)));
}

#[test]
fn empty_node_has_zero_width_box() {
    let tree = Node::list([
        Node::constant("f("),
        Composite::new("arguments").into(),
        Node::constant(")"),
    ]);

    let bbox = path_to_bounding_box(&tree, &path("1")).unwrap();
    assert_eq!(bbox.top_left, (1, 3));
    assert_eq!(bbox.bottom_right, bbox.top_left);
}

#[test]
fn missing_paths_are_errors() {
    let tree = two_assignments();
    let missing = path("2.valu");

    assert_eq!(
        path_to_bounding_box(&tree, &missing),
        Err(LocateError::PathNotFound {
            path: missing.clone()
        })
    );

    match path_to_node(&tree, Some(&missing)) {
        Err(TreeError::KeyNotFound { suggestion, .. }) => {
            assert_eq!(suggestion.as_deref(), Some("value"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn repeated_field_names_are_rejected_before_lookup() {
    let json = r#"{"type": "call", "children": [
        {"key": "arg", "value": "x"},
        ", ",
        {"key": "arg", "value": "y"}
    ]}"#;
    assert!(Node::from_json_str(json).is_err());

    // With distinct names every character maps to a box that holds it.
    let tree: Node = Composite::new("call")
        .field("first", "x")
        .unwrap()
        .text(", ")
        .field("second", "y")
        .unwrap()
        .into();
    let found = position_to_path(&tree, 1, 4).unwrap();
    assert_eq!(found, path("second"));
    assert_eq!(position_to_node(&tree, 1, 4), Some(&Node::constant("y")));
    let bbox = path_to_bounding_box(&tree, &found).unwrap();
    assert!(bbox.contains(Position::new(1, 4)));
}

#[test]
fn no_path_gives_no_node() {
    assert_eq!(path_to_node(&two_assignments(), None).unwrap(), None);
}

#[test]
fn wide_characters_count_as_one_column() {
    let tree = Node::list([assignment("ä", "1"), Node::constant("\n")]);
    assert_eq!(position_to_path(&tree, 1, 5), Some(path("0.value.value")));
    assert_eq!(
        path_to_bounding_box(&tree, &path("0")).unwrap().bottom_right,
        (1, 5)
    );
}

#[test]
fn carriage_returns_end_lines() {
    let tree = Node::list([
        assignment("a", "1"),
        Node::constant("\r\n"),
        assignment("b", "2"),
        Node::constant("\r"),
        assignment("c", "3"),
    ]);

    assert_eq!(position_to_path(&tree, 2, 5), Some(path("2.value.value")));
    assert_eq!(position_to_path(&tree, 3, 1), Some(path("4.target")));
    assert_eq!(position_to_path(&tree, 1, 6), None);

    let bbox = path_to_bounding_box(&tree, &path("4")).unwrap();
    assert_eq!(bbox.top_left, (3, 1));
    assert_eq!(bbox.bottom_right, (3, 5));
}

#[test]
fn repeated_queries_agree() {
    let tree = two_assignments();
    let target = path("2");

    let first = path_to_bounding_box(&tree, &target);
    let second = path_to_bounding_box(&tree, &target);
    assert_eq!(first, second);
    assert_eq!(position_to_path(&tree, 1, 5), position_to_path(&tree, 1, 5));
}

#[test]
fn queries_share_a_tree_across_threads() {
    let tree = two_assignments();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=5)
            .map(|column| {
                let tree = &tree;
                scope.spawn(move || position_to_path(tree, 2, column))
            })
            .collect();
        let found: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(found[0], Some(path("2.target")));
        assert_eq!(found[4], Some(path("2.value.value")));
    });
}
