use crate::{
    error::EditError,
    nav::{Direction::*, Position},
    node::ConstructKind,
    parser::ExpressionParser,
    selection::{Selection, SelectionRelation},
    tests::util::{editing, editing_empty, fraction_expression, go, move_cursor},
    Tree,
};

fn span(start: crate::NodeId, end: crate::NodeId) -> Selection {
    Selection::Span { start, end }
}

#[test]
fn test_extend_horizontally() {
    let mut session = editing(atoms!("123"));
    let root = session.tree().root();
    let digits = session.tree().children(root).to_vec();

    session.extend_selection(Left).unwrap();
    assert_eq!(session.selection(), span(digits[2], digits[2]));

    session.extend_selection(Left).unwrap();
    assert_eq!(session.selection(), span(digits[1], digits[2]));
    assert_eq!(session.cursor().position(session.tree()), Position::Within { sequence: root, index: 1 });

    // Going back the other way shrinks the selection from its start
    session.extend_selection(Right).unwrap();
    assert_eq!(session.selection(), span(digits[2], digits[2]));

    session.extend_selection(Right).unwrap();
    assert_eq!(session.selection(), Selection::Empty);
    assert_eq!(session.cursor().position(session.tree()), Position::Within { sequence: root, index: 3 });

    assert_eq!(session.extend_selection(Right), Err(EditError::NoMovement));
}

#[test]
fn test_extend_out_of_slot() {
    let mut session = editing(fraction_expression());
    let root = session.tree().root();
    let fraction = session.tree().children(root)[1];
    let numerator = session.tree().children(fraction)[ConstructKind::NUMERATOR];

    go(&mut session, &[Left, Left, Left]);
    assert_eq!(session.cursor().position(session.tree()), Position::Within { sequence: numerator, index: 0 });

    // At the edge of a slot, the whole construct is taken
    session.extend_selection(Left).unwrap();
    assert_eq!(session.selection(), span(fraction, fraction));
    assert_eq!(session.cursor().position(session.tree()), Position::Within { sequence: root, index: 1 });

    session.extend_selection(Left).unwrap();
    assert_eq!(session.selection(), span(session.tree().children(root)[0], fraction));
}

#[test]
fn test_extend_vertically() {
    let mut session = editing(fraction_expression());
    let root = session.tree().root();
    let fraction = session.tree().children(root)[1];
    let numerator = session.tree().children(fraction)[ConstructKind::NUMERATOR];

    go(&mut session, &[Left]);
    session.extend_selection(Up).unwrap();
    assert_eq!(session.selection(), span(numerator, numerator));
    assert_eq!(session.cursor().position(session.tree()), Position::Within { sequence: numerator, index: 0 });

    // A slot which is already selected gives way to its construct
    session.extend_selection(Up).unwrap();
    assert_eq!(session.selection(), span(fraction, fraction));
    assert_eq!(session.cursor().position(session.tree()), Position::Within { sequence: root, index: 1 });

    // Then the root, which encloses everything
    session.extend_selection(Down).unwrap();
    assert_eq!(session.selection(), span(root, root));
    assert_eq!(session.cursor().position(session.tree()), Position::Within { sequence: root, index: 2 });
}

#[test]
fn test_whole_slot_converts_to_range() {
    let mut session = editing(fraction_expression());
    let fraction = session.tree().children(session.tree().root())[1];
    let numerator = session.tree().children(fraction)[ConstructKind::NUMERATOR];
    let three = session.tree().children(numerator)[1];

    go(&mut session, &[Left]);
    session.extend_selection(Up).unwrap();
    assert_eq!(session.selection(), span(numerator, numerator));

    // Moving right over the first child of the selected slot deselects it
    session.extend_selection(Right).unwrap();
    assert_eq!(session.selection(), span(three, three));
}

#[test]
fn test_select_all() {
    let mut session = editing(atoms!("12"));
    let root = session.tree().root();
    go(&mut session, &[Left]);

    session.extend_selection(Down).unwrap();
    assert_eq!(session.selection(), span(root, root));
    assert_eq!(session.cursor().position(session.tree()), Position::Within { sequence: root, index: 2 });

    assert_eq!(session.extend_selection(Down), Err(EditError::NoMovement));

    session.backspace().unwrap();
    assert!(session.tree().is_empty());
    assert_eq!(session.selection(), Selection::Empty);
}

#[test]
fn test_nothing_to_select() {
    let mut session = editing_empty();
    for direction in [Left, Right, Up, Down] {
        assert_eq!(session.extend_selection(direction), Err(EditError::NoMovement));
    }
}

#[test]
fn test_move_clears_selection() {
    let mut session = editing(atoms!("12"));
    session.extend_selection(Left).unwrap();
    let cursor = session.cursor();

    move_cursor(&mut session, Left).unwrap();
    assert_eq!(session.selection(), Selection::Empty);
    assert_eq!(session.cursor(), cursor);
}

#[test]
fn test_typing_replaces_selection() {
    let mut session = editing(atoms!("123"));
    session.extend_selection(Left).unwrap();
    session.extend_selection(Left).unwrap();
    session.insert_text("45", false, &mut ExpressionParser).unwrap();

    assert_eq!(session.selection(), Selection::Empty);
    assert_eq!(session.display_text(), "145");
}

#[test]
fn test_relation() {
    let tree = Tree::with_content(atoms!("1234"));
    let digits = tree.children(tree.root()).to_vec();

    assert_eq!(Selection::Empty.relation(&tree, digits[0]), SelectionRelation::Empty);

    let selection = span(digits[1], digits[2]);
    assert_eq!(selection.relation(&tree, digits[3]), SelectionRelation::AfterEnd);
    assert_eq!(selection.relation(&tree, digits[0]), SelectionRelation::BeforeStart);
    assert_eq!(selection.relation(&tree, digits[1]), SelectionRelation::EqualsStart);
    assert_eq!(selection.relation(&tree, digits[2]), SelectionRelation::EqualsEnd);
    assert_eq!(span(digits[1], digits[1]).relation(&tree, digits[1]), SelectionRelation::EqualsBoth);
    assert_eq!(selection.range_in(&tree, tree.root()), Some((1, 2)));
}

#[test]
fn test_copy_and_delete_range() {
    let mut session = editing(atoms!("1+2"));
    for _ in 0..3 {
        session.extend_selection(Left).unwrap();
    }
    assert_eq!(session.selection_text(&mut ExpressionParser).as_deref(), Some("1+2"));

    // Shrink back down to the last two nodes, then delete them
    session.extend_selection(Right).unwrap();
    session.backspace().unwrap();
    assert_eq!(session.display_text(), "1");
    assert_eq!(session.selection(), Selection::Empty);
    assert_eq!(
        session.cursor().position(session.tree()),
        Position::Within { sequence: session.tree().root(), index: 1 },
    );
}
