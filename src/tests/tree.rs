use alloc::vec;

use crate::{nav::{Cursor, Position, Side}, node::{ConstructKind, Fragment, NodeKind, Tree}};

#[test]
fn test_empty_skeleton() {
    let tree = Tree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 2);
    assert_eq!(tree.to_fragment(tree.root()), seq![ph!()]);
    assert!(tree.content(tree.root()).is_empty());
    tree.check_invariants();
}

#[test]
fn test_with_content_normalizes() {
    let tree = Tree::with_content(seq![
        seq![atom!('1'), ph!()],
        atom!('2'),
        frac!(seq![atom!('3')], seq![ph!()]),
    ]);
    tree.check_invariants();
    assert_eq!(
        tree.to_fragment(tree.root()),
        seq![atom!('1'), atom!('2'), frac!(atoms!("3"), ph!())],
    );

    // root, two atoms, fraction, numerator sequence and its atom, denominator placeholder
    assert_eq!(tree.node_count(), 7);
}

#[test]
fn test_normalize() {
    assert_eq!(
        frac!(seq![], seq![ph!(), atom!('2')]).normalize(),
        Fragment::Construct(ConstructKind::Fraction, vec![ph!(), atoms!("2")]),
    );
    assert_eq!(seq![ph!()].normalize(), seq![]);
    assert_eq!(
        seq![seq![atom!('1')], ph!(), atom!('2')].normalize(),
        atoms!("12"),
    );
    assert_eq!(sqrt!(atom!('x')).normalize(), sqrt!(atoms!("x")));
    assert_eq!(frac!(ph!(), ph!()).node_count(), 3);
}

#[test]
fn test_document_order() {
    let tree = Tree::with_content(seq![atom!('1'), atom!('2'), frac!(atoms!("3"), ph!())]);
    let root = tree.children(tree.root()).to_vec();
    let (one, two, fraction) = (root[0], root[1], root[2]);
    let numerator = tree.children(fraction)[0];
    let denominator = tree.children(fraction)[1];
    let three = tree.children(numerator)[0];

    assert!(tree.is_before(one, fraction, true));
    assert!(tree.is_before(fraction, numerator, true));
    assert!(!tree.is_before(numerator, two, true));
    assert!(tree.is_before(numerator, denominator, true));
    assert!(tree.is_before(one, one, false));
    assert!(!tree.is_before(one, one, true));

    assert!(tree.has_ancestor(three, fraction, true));
    assert!(tree.has_ancestor(three, three, false));
    assert!(!tree.has_ancestor(three, three, true));
    assert!(!tree.has_ancestor(two, fraction, false));

    assert_eq!(tree.ancestors(three).collect::<vec::Vec<_>>(), vec![numerator, fraction, tree.root()]);
    assert_eq!(tree.first_placeholder(fraction), Some(denominator));
    assert_eq!(tree.index_in_parent(fraction), Some(2));
}

#[test]
fn test_remove_child_moves_cursor_out() {
    let mut tree = Tree::with_content(seq![atom!('1'), atom!('2'), frac!(atoms!("3"), ph!())]);
    let root = tree.root();
    let fraction = tree.children(root)[2];
    let three = tree.children(tree.children(fraction)[0])[0];

    let mut cursor = Cursor::new(three, Side::Right);
    tree.remove_child_at(root, 2, &mut cursor);
    tree.check_invariants();

    assert!(!tree.contains(fraction));
    assert!(!tree.contains(three));
    assert_eq!(cursor.position(&tree), Position::Within { sequence: root, index: 2 });
    assert_eq!(tree.to_fragment(root), atoms!("12"));
}

#[test]
fn test_remove_child_keeps_cursor_elsewhere() {
    let mut tree = Tree::with_content(atoms!("123"));
    let root = tree.root();
    let one = tree.children(root)[0];

    let mut cursor = Cursor::new(one, Side::Right);
    tree.remove_child_at(root, 2, &mut cursor);
    assert_eq!(cursor, Cursor::new(one, Side::Right));
}

#[test]
fn test_replace_slot_with_placeholder() {
    let mut tree = Tree::with_content(seq![frac!(atoms!("34"), atoms!("5"))]);
    let fraction = tree.children(tree.root())[0];
    let numerator = tree.children(fraction)[0];
    let four = tree.children(numerator)[1];

    let mut cursor = Cursor::new(four, Side::Right);
    let placeholder = tree.replace_slot_with_placeholder(numerator, &mut cursor);
    tree.check_invariants();

    assert_eq!(cursor, Cursor::new(placeholder, Side::Left));
    assert_eq!(cursor.position(&tree), Position::Slot(placeholder));
    assert_eq!(tree.to_fragment(tree.root()), seq![frac!(ph!(), atoms!("5"))]);
}

#[test]
fn test_merge_sequence_into() {
    let mut tree = Tree::with_content(atoms!("12"));
    let root = tree.root();
    let source = tree.build(&atoms!("45"));

    let mut cursor = Cursor::new(source, Side::Right);
    tree.merge_sequence_into(root, 1, source, &mut cursor);
    tree.check_invariants();

    assert!(!tree.contains(source));
    assert_eq!(tree.to_fragment(root), atoms!("1452"));
    assert_eq!(cursor.position(&tree), Position::Within { sequence: root, index: 3 });
}

#[test]
fn test_cursor_equivalence() {
    let tree = Tree::with_content(atoms!("12"));
    let root = tree.root();
    let one = tree.children(root)[0];
    let two = tree.children(root)[1];

    assert!(Cursor::new(one, Side::Right).is_equivalent_to(&Cursor::new(two, Side::Left), &tree));
    assert_eq!(Cursor::new(two, Side::Left).canonical(&tree), Cursor::new(one, Side::Right));
    assert_eq!(Cursor::new(one, Side::Left).canonical(&tree), Cursor::new(root, Side::Left));
    assert_eq!(Cursor::new(root, Side::Right).equivalent(&tree), Some(Cursor::new(two, Side::Right)));
    assert_eq!(Cursor::new(one, Side::Left).equivalent(&tree), Some(Cursor::new(root, Side::Left)));

    let empty = Tree::new();
    let placeholder = empty.children(empty.root())[0];
    assert_eq!(
        Cursor::new(placeholder, Side::Left).position(&empty),
        Position::Within { sequence: empty.root(), index: 0 },
    );
}

#[test]
fn test_removed_ids_stay_dead() {
    let mut tree = Tree::with_content(atoms!("1"));
    let root = tree.root();
    let one = tree.children(root)[0];

    let mut cursor = Cursor::new(root, Side::Left);
    tree.remove_child_at(root, 0, &mut cursor);
    let placeholder = tree.build(&ph!());
    tree.insert_child(root, 0, placeholder);

    assert!(!tree.contains(one));
    assert!(tree.contains(placeholder));
    assert!(matches!(tree.kind(placeholder), NodeKind::Placeholder));
    tree.check_invariants();
}

#[test]
fn test_serialize() {
    let tree = Tree::with_content(seq![
        atom!('2'),
        power!(atoms!("x"), atoms!("2")),
        atom!('+'),
        frac!(atoms!("1+2"), ph!()),
        sqrt!(atoms!("y")),
    ]);

    assert_eq!(tree.serialize_display(tree.root()), "2x^2+(1+2)/√(y)");
    assert_eq!(
        tree.serialize_parseable(tree.root()),
        "2\u{12}x\u{13}^\u{12}2\u{13}+\u{12}1+2\u{13}/\u{12}\u{11}\u{13}√\u{12}y\u{13}",
    );
    assert_eq!(tree.serialize_parseable_range(tree.root(), 2, 2), "+");

    let tree = Tree::with_content(seq![matrix!(2 x 2: atoms!("1"), atoms!("2"), ph!(), atoms!("4"))]);
    assert_eq!(tree.serialize_display(tree.root()), "[[1,2][,4]]");
}
