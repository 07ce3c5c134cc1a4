//! Atomic tokens, the indivisible leaves of an expression tree.

/// Placeholder marker used in parseable text for an empty slot.
pub const EMPTY_MARKER: char = '\u{11}';

/// Opening system parenthesis. Groups content in parseable text without producing a layout.
pub const SYSTEM_LEFT_PARENTHESIS: char = '\u{12}';

/// Closing system parenthesis. See [SYSTEM_LEFT_PARENTHESIS].
pub const SYSTEM_RIGHT_PARENTHESIS: char = '\u{13}';

/// Returns true if this character is one of the control markers used in parseable text. These are
/// never inserted into a tree as atoms.
pub fn is_control_marker(c: char) -> bool {
    matches!(c, EMPTY_MARKER | SYSTEM_LEFT_PARENTHESIS | SYSTEM_RIGHT_PARENTHESIS)
}

/// A token which may appear as an atomic node. These are simple, character-sized items which are
/// simple to draw, with no further nodes nested inside them.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum Token {
    /// An addition symbol.
    Add,

    /// A subtraction symbol, also used for negation.
    Subtract,

    /// An explicit multiplication sign. (Implicit multiplications have no token at all.)
    Multiply,

    /// An inline division symbol. Fractions are usually a construct instead.
    Divide,

    /// A base-10 digit.
    Digit(u8),

    /// A decimal point.
    Point,

    LeftParenthesis,
    RightParenthesis,

    /// An argument or matrix cell separator.
    Comma,

    /// A letter, either a variable or part of a function name.
    Letter(char),

    /// Any other character inserted literally.
    Symbol(char),
}

impl Token {
    /// Converts the given character to a `Token`. Every character has some token, since
    /// unrecognised characters become a [Token::Symbol].
    ///
    /// Both `*` and `×` map to [Token::Multiply].
    pub fn from_char(c: char) -> Token {
        match c {
            '+' => Token::Add,
            '-' => Token::Subtract,
            '*' | '×' => Token::Multiply,
            '/' => Token::Divide,
            '.' => Token::Point,
            '(' => Token::LeftParenthesis,
            ')' => Token::RightParenthesis,
            ',' => Token::Comma,
            _ if c.is_ascii_digit() => Token::Digit(c as u8 - b'0'),
            _ if c.is_alphabetic() => Token::Letter(c),

            _ => Token::Symbol(c),
        }
    }

    /// The character this token is displayed and serialized as.
    pub fn to_char(&self) -> char {
        match self {
            Token::Add => '+',
            Token::Subtract => '-',
            Token::Multiply => '×',
            Token::Divide => '/',
            Token::Digit(d) => (b'0' + d) as char,
            Token::Point => '.',
            Token::LeftParenthesis => '(',
            Token::RightParenthesis => ')',
            Token::Comma => ',',
            Token::Letter(c) | Token::Symbol(c) => *c,
        }
    }
}
