use super::{NodeSearch, SearchDirection, SearchOptions, Selection};
use crate::matcher::Matcher;
use crate::selector::{SelectorChain, parse};
use crate::test_utils::{TestTree, class_with_methods, decorated, labels, nested_loops};
use crate::tree::{Point, TextRange, TreeNode};

fn chains(selectors: &[&str]) -> Vec<SelectorChain> {
    selectors.iter().map(|s| parse(s).unwrap()).collect()
}

fn search(
    tree: &TestTree,
    selectors: &[&str],
    at: Point,
    options: SearchOptions,
) -> (Vec<String>, Vec<TextRange>) {
    let chains = chains(selectors);
    let output = NodeSearch::new(Matcher::new(), &chains)
        .options(options)
        .find(tree.root(), Selection::cursor(at));
    (labels(&output.matches), output.ranges)
}

fn kinds(tree: &TestTree, selectors: &[&str], at: Point, options: SearchOptions) -> Vec<String> {
    search(tree, selectors, at, options)
        .0
        .into_iter()
        .map(|label| label.split(' ').next().unwrap_or_default().to_owned())
        .collect()
}

#[test]
fn enclosing_loop_is_innermost_first() {
    let tree = nested_loops();
    let at = tree.point_in("break", 2);

    let found = kinds(
        &tree,
        &["(for_statement|while_statement)"],
        at,
        SearchOptions::default(),
    );

    assert_eq!(found, ["while_statement"]);
}

#[test]
fn count_reaches_the_outer_loop() {
    let tree = nested_loops();
    let at = tree.point_in("break", 2);

    let found = kinds(
        &tree,
        &["(for_statement|while_statement)"],
        at,
        SearchOptions::default().count(2),
    );

    assert_eq!(found, ["for_statement"]);
}

#[test]
fn greedy_reports_outermost_enclosing_match() {
    let tree = nested_loops();
    let at = tree.point_in("break", 2);

    let found = kinds(
        &tree,
        &["(for_statement|while_statement)"],
        at,
        SearchOptions::default().greedy(true),
    );

    assert_eq!(found, ["for_statement"]);
}

#[test]
fn optional_wrapper_is_selected_from_the_name() {
    let tree = decorated();
    let at = tree.find_text("identifier", "f").start_point();

    let found = kinds(
        &tree,
        &["decorated_definition?.function_definition"],
        at,
        SearchOptions::default(),
    );

    assert_eq!(found, ["decorated_definition"]);
}

#[test]
fn backwards_finds_previous_sibling_construct() {
    let tree = class_with_methods();
    let at = tree.find_text("identifier", "h").start_point();
    let options = SearchOptions::default().direction(SearchDirection::Backwards);

    let (first, _) = search(&tree, &["function_definition"], at, options);
    let (second, _) = search(&tree, &["function_definition"], at, options.count(2));
    let (third, _) = search(&tree, &["function_definition"], at, options.count(3));

    assert_eq!(first, ["function_definition \"def g(): pass\""]);
    assert_eq!(second, ["function_definition \"def f(): pass\""]);
    assert!(third.is_empty());
}

#[test]
fn forwards_finds_next_sibling_construct() {
    let tree = class_with_methods();
    let at = tree.find_text("identifier", "f").start_point();
    let options = SearchOptions::default().direction(SearchDirection::Forwards);

    let (found, _) = search(&tree, &["function_definition"], at, options);

    assert_eq!(found, ["function_definition \"def g(): pass\""]);
}

#[test]
fn smart_falls_back_to_closest_position() {
    let tree = class_with_methods();
    let at = tree.find_text("identifier", "A").start_point();

    let (found, _) = search(&tree, &["function_definition"], at, SearchOptions::default());

    assert_eq!(found, ["function_definition \"def f(): pass\""]);
}

#[test]
fn candidate_order_beats_chain_order() {
    let tree = nested_loops();
    let at = tree.point_in("break", 2);

    let found = kinds(
        &tree,
        &["if_statement", "for_statement", "while_statement"],
        at,
        SearchOptions::default(),
    );

    assert_eq!(found, ["while_statement"]);
}

#[test]
fn multi_chain_runs_top_down_from_candidates() {
    let tree = class_with_methods();
    let at = tree.find_text("identifier", "A").start_point();
    let chains = ["class_definition.function_definition[]"];

    let (found, merged) = search(&tree, &chains, at, SearchOptions::default());
    let (_, every) = search(&tree, &chains, at, SearchOptions::default().every(true));

    assert_eq!(found.len(), 3);
    assert_eq!(
        merged,
        [TextRange::new(Point::new(1, 4), Point::new(3, 17))]
    );
    assert_eq!(every.len(), 3);
    assert_eq!(every[1], TextRange::new(Point::new(2, 4), Point::new(2, 17)));
}

#[test]
fn inside_range_excludes_delimiters() {
    let tree = class_with_methods();
    let at = tree.point_in("g()", 1);

    let (_, ranges) = search(
        &tree,
        &["parameters"],
        at,
        SearchOptions::default().inside(true),
    );

    assert_eq!(ranges, [TextRange::empty(Point::new(2, 10))]);
}

#[test]
fn no_match_is_empty() {
    let tree = class_with_methods();
    let at = tree.find_text("identifier", "g").start_point();

    let (found, ranges) = search(&tree, &["while_statement"], at, SearchOptions::default());

    assert!(found.is_empty());
    assert!(ranges.is_empty());
}

#[test]
fn cursor_past_the_tree_uses_nearest_leaf() {
    let tree = class_with_methods();

    let (found, _) = search(
        &tree,
        &["function_definition"],
        Point::new(40, 0),
        SearchOptions::default(),
    );

    assert_eq!(found, ["function_definition \"def h(): pass\""]);
}

#[test]
fn direction_parses_from_name() {
    assert_eq!("smart".parse::<SearchDirection>(), Ok(SearchDirection::Smart));
    assert_eq!(
        "backwards".parse::<SearchDirection>(),
        Ok(SearchDirection::Backwards)
    );
    assert_eq!(SearchDirection::Forwards.to_string(), "forwards");
    assert!("up".parse::<SearchDirection>().is_err());
}

#[test]
fn report_serializes_matches() {
    let tree = nested_loops();
    let chains = chains(&["while_statement"]);
    let output = NodeSearch::new(Matcher::new(), &chains)
        .find(tree.root(), Selection::cursor(tree.point_in("break", 0)));

    let report = output.report();

    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches[0].kind, "while_statement");
    assert!(report.matches[0].named);
    assert_eq!(report.ranges, [output.matches[0].range()]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["matches"][0]["kind"], "while_statement");
    assert_eq!(json["matches"][0]["range"], json["ranges"][0]);
    let back: super::SearchReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}
