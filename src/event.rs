//! Input events, and the structural text tokens which insert construct skeletons.

use alloc::{string::String, vec};

use crate::{nav::Direction, node::{ConstructKind, Fragment, Token}};

/// An input event delivered to a [Field](crate::field::Field).
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Event {
    /// Move the cursor.
    Move(Direction),

    /// Move the cursor, extending the selection over what it passes.
    ExtendSelection(Direction),

    /// Insert text at the cursor.
    Text(String),

    Paste,
    Copy,
    Backspace,
    Clear,

    /// Finish editing, or start editing if the field is inactive.
    Commit,

    /// Abandon editing, discarding the content.
    Abort,
}

pub const FRACTION_TOKEN: &str = "/";
pub const POWER_TOKEN: &str = "^";
pub const EXPONENTIAL_TOKEN: &str = "e^";
pub const SQUARE_TOKEN: &str = "^2";
pub const SQUARE_ROOT_TOKEN: &str = "√";
pub const TIMES_TEN_POWER_TOKEN: &str = "ᴇ";
pub const MATRIX_OPEN_TOKEN: &str = "[";
pub const MATRIX_CLOSE_TOKEN: &str = "]";
pub const MULTIPLICATION_TOKEN: &str = "×";

/// The skeleton inserted for a structural token, or `None` if the text is not one. Skeletons are
/// returned normalized.
pub fn skeleton_for(text: &str) -> Option<Fragment> {
    let power = |base: Fragment, exp: Fragment| Fragment::Construct(ConstructKind::Power, vec![base, exp]);

    let fragment = match text {
        FRACTION_TOKEN => Fragment::empty_construct(ConstructKind::Fraction),
        POWER_TOKEN => Fragment::empty_construct(ConstructKind::Power),
        EXPONENTIAL_TOKEN => power(Fragment::atoms("e"), Fragment::Placeholder),
        SQUARE_TOKEN => power(Fragment::Placeholder, Fragment::atoms("2")),
        SQUARE_ROOT_TOKEN => Fragment::empty_construct(ConstructKind::SquareRoot),
        TIMES_TEN_POWER_TOKEN => Fragment::Sequence(vec![
            Fragment::Atomic(Token::Multiply),
            power(Fragment::atoms("10"), Fragment::Placeholder),
        ]),
        MATRIX_OPEN_TOKEN | MATRIX_CLOSE_TOKEN => Fragment::empty_construct(ConstructKind::matrix(1, 1)),
        MULTIPLICATION_TOKEN => Fragment::Atomic(Token::Multiply),
        _ => return None,
    };

    Some(Fragment::Sequence(vec![fragment]).normalize())
}
