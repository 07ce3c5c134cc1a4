use crate::{
    error::EditError,
    nav::{Direction::{self, *}, Position},
    node::ConstructKind,
    tests::util::{content, editing, editing_empty, fraction_expression, go, move_cursor},
    EditSession, NodeId,
};

fn position(session: &EditSession) -> Position {
    session.cursor().position(session.tree())
}

fn child(session: &EditSession, parent: NodeId, index: usize) -> NodeId {
    session.tree().children(parent)[index]
}

#[test]
fn test_horizontal_navigation() {
    let mut session = editing(atoms!("123"));
    let root = session.tree().root();
    assert_eq!(position(&session), Position::Within { sequence: root, index: 3 });

    go(&mut session, &[Left, Left]);
    assert_eq!(position(&session), Position::Within { sequence: root, index: 1 });

    go(&mut session, &[Left]);
    assert_eq!(move_cursor(&mut session, Left), Err(EditError::NoMovement));
    assert_eq!(position(&session), Position::Within { sequence: root, index: 0 });

    go(&mut session, &[Right, Right, Right]);
    assert_eq!(move_cursor(&mut session, Right), Err(EditError::NoMovement));
    assert_eq!(position(&session), Position::Within { sequence: root, index: 3 });

    // Nowhere to go vertically outside of a construct
    assert_eq!(move_cursor(&mut session, Up), Err(EditError::NoMovement));
    assert_eq!(move_cursor(&mut session, Down), Err(EditError::NoMovement));
}

#[test]
fn test_empty_navigation() {
    let mut session = editing_empty();
    for direction in [Left, Right, Up, Down] {
        assert_eq!(move_cursor(&mut session, direction), Err(EditError::NoMovement));
    }
    assert!(session.tree().is_empty());
}

#[test]
fn test_fraction_navigation() {
    let mut session = editing(fraction_expression());
    let root = session.tree().root();
    let fraction = child(&session, root, 1);
    let numerator = child(&session, fraction, ConstructKind::NUMERATOR);
    let denominator = child(&session, fraction, ConstructKind::DENOMINATOR);

    // Moving left into a fraction lands at the end of the numerator
    go(&mut session, &[Left]);
    assert_eq!(position(&session), Position::Within { sequence: numerator, index: 2 });

    go(&mut session, &[Down]);
    assert_eq!(position(&session), Position::Within { sequence: denominator, index: 1 });

    // Vertical movement lines up horizontal positions across centred slots
    go(&mut session, &[Up]);
    assert_eq!(position(&session), Position::Within { sequence: numerator, index: 1 });
    go(&mut session, &[Left, Down]);
    assert_eq!(position(&session), Position::Within { sequence: denominator, index: 0 });

    // Out of the right of the fraction
    go(&mut session, &[Right, Right]);
    assert_eq!(position(&session), Position::Within { sequence: root, index: 2 });

    // Moving right into a fraction lands at the start of the numerator
    go(&mut session, &[Left, Left, Left]);
    assert_eq!(position(&session), Position::Within { sequence: numerator, index: 0 });
    go(&mut session, &[Left]);
    assert_eq!(position(&session), Position::Within { sequence: root, index: 1 });
    go(&mut session, &[Right]);
    assert_eq!(position(&session), Position::Within { sequence: numerator, index: 0 });

    // Up from the numerator has nowhere to go
    assert_eq!(move_cursor(&mut session, Up), Err(EditError::NoMovement));
}

#[test]
fn test_power_navigation() {
    let mut session = editing(seq![power!(atoms!("x"), atoms!("2"))]);
    let power = child(&session, session.tree().root(), 0);
    let base = child(&session, power, ConstructKind::BASE);
    let exponent = child(&session, power, ConstructKind::EXPONENT);

    go(&mut session, &[Left]);
    assert_eq!(position(&session), Position::Within { sequence: exponent, index: 1 });

    go(&mut session, &[Left, Left]);
    assert_eq!(position(&session), Position::Within { sequence: base, index: 1 });

    go(&mut session, &[Up]);
    assert_eq!(position(&session), Position::Within { sequence: exponent, index: 0 });

    go(&mut session, &[Down]);
    assert_eq!(position(&session), Position::Within { sequence: base, index: 1 });
}

#[test]
fn test_placeholder_navigation() {
    let mut session = editing(seq![frac!(ph!(), ph!())]);
    let fraction = child(&session, session.tree().root(), 0);
    let numerator = child(&session, fraction, ConstructKind::NUMERATOR);
    let denominator = child(&session, fraction, ConstructKind::DENOMINATOR);

    go(&mut session, &[Left]);
    assert_eq!(position(&session), Position::Slot(numerator));

    go(&mut session, &[Down]);
    assert_eq!(position(&session), Position::Slot(denominator));

    go(&mut session, &[Up]);
    assert_eq!(position(&session), Position::Slot(numerator));
}

#[test]
fn test_matrix_navigation() {
    let mut session = editing(seq![matrix!(2 x 2: atoms!("a"), atoms!("b"), atoms!("c"), atoms!("d"))]);
    let matrix = child(&session, session.tree().root(), 0);
    assert_eq!(session.node_count(), 10);

    // Entering the matrix adds a grey row and column
    go(&mut session, &[Left]);
    assert_eq!(
        session.tree().construct_kind(matrix),
        Some(ConstructKind::Matrix { rows: 3, columns: 3, grey: true }),
    );
    assert_eq!(session.node_count(), 15);
    let b = child(&session, matrix, 1);
    assert_eq!(position(&session), Position::Within { sequence: b, index: 1 });

    go(&mut session, &[Down]);
    let d = child(&session, matrix, 4);
    assert_eq!(position(&session), Position::Within { sequence: d, index: 1 });

    go(&mut session, &[Down]);
    assert_eq!(position(&session), Position::Slot(child(&session, matrix, 7)));

    go(&mut session, &[Right]);
    assert_eq!(position(&session), Position::Slot(child(&session, matrix, 8)));

    // Leaving takes the grey squares away again
    go(&mut session, &[Right]);
    assert_eq!(position(&session), Position::Within { sequence: session.tree().root(), index: 1 });
    assert_eq!(
        session.tree().construct_kind(matrix),
        Some(ConstructKind::matrix(2, 2)),
    );
    assert_eq!(
        content(&session),
        seq![matrix!(2 x 2: atoms!("a"), atoms!("b"), atoms!("c"), atoms!("d"))],
    );
}

#[test]
fn test_movement_requires_editing() {
    let mut session = EditSession::with_content(Default::default(), atoms!("12")).unwrap();
    session.set_editing(false);
    assert_eq!(move_cursor(&mut session, Direction::Left), Err(EditError::NotEditing));
}
