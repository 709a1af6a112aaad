use super::{Point, TextRange, TreeNode, walk};
use crate::test_utils::{decorated, labels};

#[test]
fn points_order_by_row_then_column() {
    assert!(Point::new(1, 9) < Point::new(2, 0));
    assert!(Point::new(2, 0) < Point::new(2, 1));
    assert_eq!(Point::new(3, 4).to_string(), "3:4");
}

#[test]
fn distance_is_per_axis() {
    let from = Point::new(10, 4);

    assert_eq!(from.distance(Point::new(8, 3)), (2, 1));
    assert_eq!(from.distance(Point::new(12, 1)), (2, 3));
    assert_eq!(from.distance(from), (0, 0));
    assert!(from.distance(Point::new(10, 90)) < from.distance(Point::new(11, 4)));
}

#[test]
fn ranges_are_half_open() {
    let range = TextRange::new(Point::new(1, 0), Point::new(1, 5));

    assert!(range.contains(Point::new(1, 0)));
    assert!(range.contains(Point::new(1, 4)));
    assert!(!range.contains(Point::new(1, 5)));
    assert!(!TextRange::empty(Point::new(1, 0)).contains(Point::new(1, 0)));
    assert_eq!(range.to_string(), "1:0-1:5");
}

#[test]
fn cover_spans_both() {
    let a = TextRange::new(Point::new(1, 4), Point::new(1, 9));
    let b = TextRange::new(Point::new(0, 2), Point::new(1, 6));

    assert_eq!(a.cover(b), TextRange::new(Point::new(0, 2), Point::new(1, 9)));
    assert!(!a.is_empty());
}

#[test]
fn walk_is_preorder() {
    let tree = decorated();
    let kinds: Vec<String> = walk(tree.find("decorated_definition", 0))
        .take(6)
        .map(|n| n.kind().to_owned())
        .collect();

    assert_eq!(
        kinds,
        ["decorated_definition", "decorator", "@", "identifier", "function_definition", "def"]
    );
}

#[test]
fn index_in_parent_and_siblings() {
    let tree = decorated();
    let g = tree.find("function_definition", 1);

    assert_eq!(g.index_in_parent(), Some(1));
    assert_eq!(
        labels(&g.siblings())[0],
        r#"decorated_definition "@cache\ndef f(): pass""#
    );
    assert_eq!(tree.root().index_in_parent(), None);
    assert_eq!(tree.root().siblings(), [tree.root()]);
}

#[test]
fn same_node_compares_identity() {
    let tree = decorated();
    let f = tree.find_text("identifier", "f");

    assert!(f.same_node(&tree.find("identifier", 1)));
    assert!(!f.same_node(&tree.find("identifier", 0)));
}

#[test]
fn node_points() {
    let tree = decorated();
    let g = tree.find_text("identifier", "g");

    assert_eq!(g.range(), TextRange::new(Point::new(3, 4), Point::new(3, 5)));
    assert_eq!(g.byte_range(), 26..27);
}
