use super::{LocateMode, locate, locate_nearest, locate_with};
use crate::test_utils::{TestTree, class_with_methods, decorated};
use crate::tree::{Point, TreeNode, walk};

fn located(tree: &TestTree, at: Point) -> Option<String> {
    locate(at, tree.root()).map(|p| p.node().label())
}

fn every_point(source: &str) -> Vec<Point> {
    source
        .lines()
        .enumerate()
        .flat_map(|(row, line)| (0..=line.len()).map(move |column| Point::new(row, column)))
        .collect()
}

#[test]
fn agrees_with_a_linear_scan() {
    for tree in [class_with_methods(), decorated()] {
        let source = tree.root().text().to_owned();
        for at in every_point(&source) {
            let boundary = walk(tree.root()).any(|n| n.end_point() == at);
            if boundary {
                continue;
            }

            let deepest = walk(tree.root())
                .filter(|n| n.range().contains(at))
                .last()
                .map(|n| n.label());
            assert_eq!(located(&tree, at), deepest, "at {at}");
        }
    }
}

#[test]
fn path_runs_from_the_root() {
    let tree = class_with_methods();
    let path = locate(tree.point_in("pass", 1), tree.root()).unwrap();

    assert_eq!(path.node().label(), r#"pass "pass""#);
    assert_eq!(path.root().node(), tree.root());
    assert_eq!(path.depth(), 5);
}

#[test]
fn touching_boundary_prefers_named() {
    let tree = class_with_methods();

    // `parameters` ends where anonymous `:` starts.
    assert_eq!(
        located(&tree, tree.point_in("():", 2)).as_deref(),
        Some(r#"parameters "()""#)
    );
}

#[test]
fn touching_boundary_between_named_takes_the_later() {
    let tree = class_with_methods();

    // `f` ends where `parameters` starts; descends into `(`.
    assert_eq!(
        located(&tree, tree.point_in("f(", 1)).as_deref(),
        Some(r#"( "(""#)
    );
}

#[test]
fn gap_between_children_stops_at_parent() {
    let tree = class_with_methods();

    assert_eq!(
        located(&tree, Point::new(1, 0)).as_deref(),
        Some("class_definition \"class A:\\n    def f(): pass\\n    def g(): pass\\n    def h(): pass\"")
    );
}

#[test]
fn outside_root_is_none() {
    let tree = class_with_methods();

    assert_eq!(located(&tree, Point::new(40, 0)), None);
    assert!(locate_with(Point::new(40, 0), tree.root(), LocateMode::Exact).is_none());
}

#[test]
fn nearest_descends_through_gaps() {
    let tree = class_with_methods();

    // Indentation before `def f`: the named function beats the anonymous `:` before it.
    let path = locate_nearest(Point::new(1, 0), tree.root());
    assert_eq!(path.node().label(), r#"def "def""#);
    assert_eq!(path.node().start_point(), Point::new(1, 4));
}

#[test]
fn nearest_past_the_end_is_the_last_leaf() {
    let tree = class_with_methods();

    let path = locate_nearest(Point::new(40, 0), tree.root());
    assert_eq!(path.node().label(), r#"pass "pass""#);
    assert_eq!(path.node().start_point(), Point::new(3, 13));
}

#[test]
fn nearest_inside_a_node_matches_exact() {
    let tree = decorated();
    let at = tree.point_in("cache", 2);

    let exact = locate(at, tree.root()).unwrap();
    let nearest = locate_nearest(at, tree.root());
    assert_eq!(exact.node(), nearest.node());
    assert_eq!(nearest.node().label(), r#"identifier "cache""#);
}
