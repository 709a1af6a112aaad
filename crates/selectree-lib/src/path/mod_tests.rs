use super::PathNode;
use crate::test_utils::{TestNode, class_with_methods};
use crate::tree::TreeNode;

/// module > class_definition > function_definition `g`
fn path_to_g(root: TestNode) -> PathNode<TestNode> {
    PathNode::new_root(root).push_child(0).push_child(4)
}

#[test]
fn root_record() {
    let tree = class_with_methods();
    let path = PathNode::new_root(tree.root());

    assert_eq!(path.depth(), 0);
    assert!(path.parent().is_none());
    assert!(path.child().is_none());
    assert_eq!(path.index_in_parent(), None);
    assert_eq!(path.node(), tree.root());
}

#[test]
fn pushed_children_link_both_ways() {
    let tree = class_with_methods();
    let g = path_to_g(tree.root());

    assert_eq!(g.depth(), 2);
    assert_eq!(g.index_in_parent(), Some(4));
    assert_eq!(g.node(), tree.find("function_definition", 1));

    let root = g.root();
    assert_eq!(root.node(), tree.root());
    assert_eq!(root.leaf().node(), g.node());

    let class = g.parent().unwrap();
    assert_eq!(class.child().unwrap().node(), g.node());
    assert_eq!(class.index_in_parent(), Some(0));
}

#[test]
fn nodes_run_root_to_record() {
    let tree = class_with_methods();
    let kinds: Vec<String> = path_to_g(tree.root())
        .nodes()
        .iter()
        .map(|n| n.kind().to_owned())
        .collect();

    assert_eq!(kinds, ["module", "class_definition", "function_definition"]);
}

#[test]
fn debug_shows_the_spine() {
    let tree = class_with_methods();
    let path = path_to_g(tree.root()).push_child(1);

    insta::assert_snapshot!(
        format!("{path:?}"),
        @"PathNode(module > class_definition > function_definition > identifier)"
    );
}

#[test]
fn copy_from_root_leaves_original_untouched() {
    let tree = class_with_methods();
    let g = path_to_g(tree.root());
    let name = g.push_child(1);

    let copy = g.copy_from_root();
    assert_eq!(copy.node(), g.node());
    assert_eq!(copy.depth(), 2);
    assert!(copy.child().is_none());
    assert_eq!(g.child().unwrap().node(), name.node());

    let params = copy.push_child(2);
    assert_eq!(params.node().kind(), "parameters");
    assert_eq!(g.leaf().node(), name.node());
}

#[test]
fn graft_sibling_switches_the_last_step() {
    let tree = class_with_methods();
    let g = path_to_g(tree.root());

    let f = g.graft_sibling(3);
    assert_eq!(f.node(), tree.find("function_definition", 0));
    assert_eq!(f.index_in_parent(), Some(3));
    assert_eq!(f.root().node(), tree.root());

    let class = g.parent().unwrap();
    assert_eq!(class.child().unwrap().node(), g.node());
}

#[test]
fn iter_up_climbs_to_root() {
    let tree = class_with_methods();
    let kinds: Vec<String> = path_to_g(tree.root())
        .push_child(1)
        .iter_up()
        .map(|p| p.node().kind().to_owned())
        .collect();

    assert_eq!(
        kinds,
        ["identifier", "function_definition", "class_definition", "module"]
    );
}

#[test]
#[should_panic(expected = "path child is already set")]
fn record_takes_one_child() {
    let tree = class_with_methods();
    let class = PathNode::new_root(tree.root()).push_child(0);

    class.push_child(3);
    class.push_child(4);
}

#[test]
#[should_panic(expected = "out of range")]
fn push_child_past_the_end() {
    let tree = class_with_methods();
    PathNode::new_root(tree.root()).push_child(1);
}

#[test]
#[should_panic(expected = "no siblings")]
fn graft_at_root() {
    let tree = class_with_methods();
    PathNode::new_root(tree.root()).graft_sibling(0);
}
