use crate::{EditSession, EditorSettings, Fragment, nav::Direction, parser::ExpressionParser, renderers::AsciiRenderer, error::EditError};

macro_rules! seq {
    ($($x:expr),* $(,)?) => { crate::node::Fragment::Sequence(alloc::vec![ $($x),* ]) };
}

macro_rules! atoms {
    ($s:expr) => { crate::node::Fragment::atoms($s) };
}

macro_rules! atom {
    ($c:literal) => { crate::node::Fragment::Atomic(crate::node::Token::from_char($c)) };
}

macro_rules! ph {
    () => { crate::node::Fragment::Placeholder };
}

macro_rules! frac {
    ($t:expr, $b:expr $(,)?) => {
        crate::node::Fragment::Construct(crate::node::ConstructKind::Fraction, alloc::vec![$t, $b])
    };
}

macro_rules! power {
    ($b:expr, $e:expr $(,)?) => {
        crate::node::Fragment::Construct(crate::node::ConstructKind::Power, alloc::vec![$b, $e])
    };
}

macro_rules! sqrt {
    ($r:expr $(,)?) => {
        crate::node::Fragment::Construct(crate::node::ConstructKind::SquareRoot, alloc::vec![$r])
    };
}

macro_rules! matrix {
    ($rows:literal x $columns:literal: $($cell:expr),* $(,)?) => {
        crate::node::Fragment::Construct(
            crate::node::ConstructKind::matrix($rows, $columns),
            alloc::vec![ $($cell),* ],
        )
    };
}

macro_rules! render {
    ($n:expr $(,)?) => { {
        let mut renderer = crate::renderers::AsciiRenderer::default();
        <crate::renderers::AsciiRenderer as crate::render::Renderer>::draw_all(&mut renderer, &$n);
        renderer.lines
    } };
}

/// An editing session over the given content, with the cursor at the end.
pub fn editing(fragment: Fragment) -> EditSession {
    EditSession::with_content(EditorSettings::default(), fragment).unwrap()
}

/// An editing session over an empty tree.
pub fn editing_empty() -> EditSession {
    let mut session = EditSession::default();
    session.set_editing(true);
    session
}

/// The whole content of a session's tree.
pub fn content(session: &EditSession) -> Fragment {
    session.tree().to_fragment(session.tree().root())
}

pub fn type_text(session: &mut EditSession, text: &str) {
    session.insert_text(text, false, &mut ExpressionParser).unwrap();
}

pub fn move_cursor(session: &mut EditSession, direction: Direction) -> Result<(), EditError> {
    session.move_cursor(direction, &mut AsciiRenderer::default())
}

/// Moves the cursor, asserting that it moved.
pub fn go(session: &mut EditSession, directions: &[Direction]) {
    for direction in directions {
        move_cursor(session, *direction).unwrap();
    }
}

/// ```text
///  23
/// 1--
///   4
/// ```
pub fn fraction_expression() -> Fragment {
    seq![atom!('1'), frac!(atoms!("23"), atoms!("4"))]
}
