//! Parsing text into expression fragments.
//!
//! The [Parse] trait is the seam between the editor and the expression language it accepts. The
//! provided [ExpressionParser] understands arithmetic with implicit multiplication, powers,
//! square roots, function calls and matrices, plus the control markers used by the parseable
//! serialization form.

use alloc::{boxed::Box, string::{String, ToString}, vec, vec::Vec};
use rust_decimal::Decimal;

use crate::{error::ParseError, node::{ConstructKind, Fragment, Token, EMPTY_MARKER, SYSTEM_LEFT_PARENTHESIS, SYSTEM_RIGHT_PARENTHESIS}};

/// Parses text into a fragment which can be inserted into a tree.
pub trait Parse {
    /// Returns a normalized fragment for the given text, or an error if it is not a valid
    /// expression.
    fn parse(&mut self, text: &str) -> Result<Fragment, ParseError>;
}

/// The default expression parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionParser;

impl Parse for ExpressionParser {
    fn parse(&mut self, text: &str) -> Result<Fragment, ParseError> {
        let lexemes = lex(text)?;
        let expression = Parser { lexemes: &lexemes, index: 0 }.parse()?;
        Ok(Fragment::Sequence(expression.layout()).normalize())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Lexeme {
    Number(Decimal),
    Identifier(String),
    Add,
    Subtract,
    Multiply,
    Divide,
    Caret,
    Squared,
    Sqrt,
    LeftParenthesis,
    RightParenthesis,
    LeftBracket,
    RightBracket,
    Comma,
    GroupOpen,
    GroupClose,
    Empty,
}

fn lex(text: &str) -> Result<Vec<Lexeme>, ParseError> {
    let chars = text.chars().collect::<Vec<_>>();
    let mut lexemes = vec![];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            lexemes.push(Lexeme::Number(parse_number(&chars[start..i])?));
            continue;
        }

        if c.is_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_alphabetic() {
                i += 1;
            }
            lexemes.push(Lexeme::Identifier(chars[start..i].iter().collect()));
            continue;
        }

        i += 1;
        lexemes.push(match c {
            '+' => Lexeme::Add,
            '-' => Lexeme::Subtract,
            '*' | '×' | '·' => Lexeme::Multiply,
            '/' | '÷' => Lexeme::Divide,
            '^' => Lexeme::Caret,
            '²' => Lexeme::Squared,
            '√' => Lexeme::Sqrt,
            '(' => Lexeme::LeftParenthesis,
            ')' => Lexeme::RightParenthesis,
            '[' => Lexeme::LeftBracket,
            ']' => Lexeme::RightBracket,
            ',' => Lexeme::Comma,
            SYSTEM_LEFT_PARENTHESIS => Lexeme::GroupOpen,
            SYSTEM_RIGHT_PARENTHESIS => Lexeme::GroupClose,
            EMPTY_MARKER => Lexeme::Empty,
            _ if c.is_whitespace() => continue,
            _ => return Err(ParseError::UnexpectedCharacter(c)),
        });
    }

    Ok(lexemes)
}

/// Parses a run of digits and points. "3." is accepted as "3", and ".5" as "0.5".
fn parse_number(chars: &[char]) -> Result<Decimal, ParseError> {
    let points = chars.iter().filter(|c| **c == '.').count();
    if points > 1 || chars == ['.'] {
        return Err(ParseError::MalformedNumber);
    }

    let mut text = String::new();
    if chars.first() == Some(&'.') {
        text.push('0');
    }
    text.extend(chars);
    if text.ends_with('.') {
        text.pop();
    }

    // Rounding would change the digits the user typed
    Decimal::from_str_exact(&text).map_err(|_| ParseError::NumberOutOfRange)
}

/// An expression parsed from text. This only lives long enough to be laid out into a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Expression {
    Number(Decimal),
    Variable(char),
    Empty,
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    ImplicitMultiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Power(Box<Expression>, Box<Expression>),
    Negate(Box<Expression>),
    Parentheses(Box<Expression>),
    Group(Box<Expression>),
    Sqrt(Box<Expression>),
    FunctionCall(String, Vec<Expression>),
    Matrix(Vec<Vec<Expression>>),
}

impl Expression {
    /// Converts this expression into the sequence items which display it.
    fn layout(&self) -> Vec<Fragment> {
        let atom = |token| vec![Fragment::Atomic(token)];
        let binop = |left: &Expression, token, right: &Expression| {
            let mut items = left.layout();
            items.push(Fragment::Atomic(token));
            items.extend(right.layout());
            items
        };

        match self {
            Expression::Number(number)
                => number.to_string().chars().map(|c| Fragment::Atomic(Token::from_char(c))).collect(),
            Expression::Variable(v) => atom(Token::Letter(*v)),
            Expression::Empty => vec![Fragment::Placeholder],

            Expression::Add(l, r) => binop(l, Token::Add, r),
            Expression::Subtract(l, r) => binop(l, Token::Subtract, r),
            Expression::Multiply(l, r) => binop(l, Token::Multiply, r),
            Expression::ImplicitMultiply(l, r) => {
                let mut items = l.layout();
                items.extend(r.layout());
                items
            }

            Expression::Negate(inner) => {
                let mut items = atom(Token::Subtract);
                items.extend(inner.layout());
                items
            }
            Expression::Parentheses(inner) => {
                let mut items = atom(Token::LeftParenthesis);
                items.extend(inner.layout());
                items.push(Fragment::Atomic(Token::RightParenthesis));
                items
            }
            Expression::Group(inner) => inner.layout(),

            Expression::Divide(top, bottom)
                => vec![Fragment::Construct(ConstructKind::Fraction, vec![top.slot(), bottom.slot()])],
            Expression::Power(base, exp)
                => vec![Fragment::Construct(ConstructKind::Power, vec![base.slot(), exp.slot()])],
            Expression::Sqrt(inner)
                => vec![Fragment::Construct(ConstructKind::SquareRoot, vec![inner.slot()])],

            Expression::FunctionCall(name, args) => {
                let mut items = name.chars().map(|c| Fragment::Atomic(Token::Letter(c))).collect::<Vec<_>>();
                items.push(Fragment::Atomic(Token::LeftParenthesis));
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        items.push(Fragment::Atomic(Token::Comma));
                    }
                    items.extend(arg.layout());
                }
                items.push(Fragment::Atomic(Token::RightParenthesis));
                items
            }

            Expression::Matrix(rows) => {
                let columns = rows.first().map_or(0, |r| r.len());
                vec![Fragment::Construct(
                    ConstructKind::matrix(rows.len(), columns),
                    rows.iter().flatten().map(Expression::slot).collect(),
                )]
            }
        }
    }

    /// Lays out this expression as the content of a construct slot. The slot already groups its
    /// content, so one level of parentheses is dropped.
    fn slot(&self) -> Fragment {
        let inner = match self {
            Expression::Parentheses(inner) | Expression::Group(inner) => inner,
            other => other,
        };
        Fragment::Sequence(inner.layout())
    }
}

/// A recursive-descent parser over lexemes, from lowest to highest precedence:
///
///   - Level 1: addition and subtraction
///   - Level 2: explicit multiplication and division
///   - Level 3: unary minus, powers and implicit multiplication
///   - Units: numbers, variables, parenthesised and grouped expressions, square roots, function
///     calls, matrices and empty markers
struct Parser<'a> {
    lexemes: &'a [Lexeme],
    index: usize,
}

impl<'a> Parser<'a> {
    fn parse(&mut self) -> Result<Expression, ParseError> {
        let result = self.parse_level1()?;

        // Leftover tokens is an error
        if self.index < self.lexemes.len() {
            Err(ParseError::UnexpectedTokensAtEnd)
        } else {
            Ok(result)
        }
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn current(&self) -> Option<&'a Lexeme> {
        self.lexemes.get(self.index)
    }

    fn expect(&mut self, lexeme: Lexeme) -> Result<(), ParseError> {
        match self.current() {
            Some(l) if *l == lexeme => {
                self.advance();
                Ok(())
            }
            Some(_) => Err(ParseError::UnexpectedToken),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn parse_level1(&mut self) -> Result<Expression, ParseError> {
        let mut out = self.parse_level2()?;

        while let Some(op @ (Lexeme::Add | Lexeme::Subtract)) = self.current() {
            self.advance();
            let right = Box::new(self.parse_level2()?);
            out = if *op == Lexeme::Add {
                Expression::Add(Box::new(out), right)
            } else {
                Expression::Subtract(Box::new(out), right)
            };
        }

        Ok(out)
    }

    fn parse_level2(&mut self) -> Result<Expression, ParseError> {
        let mut out = self.parse_level3()?;

        while let Some(op @ (Lexeme::Multiply | Lexeme::Divide)) = self.current() {
            self.advance();
            let right = Box::new(self.parse_level3()?);
            out = if *op == Lexeme::Multiply {
                Expression::Multiply(Box::new(out), right)
            } else {
                Expression::Divide(Box::new(out), right)
            };
        }

        Ok(out)
    }

    fn parse_level3(&mut self) -> Result<Expression, ParseError> {
        // Each unary minus is kept, so that the layout shows exactly what was typed
        let mut negations = 0;
        while let Some(Lexeme::Subtract) = self.current() {
            self.advance();
            negations += 1;
        }

        let unit = self.parse_unit()?;
        let mut result = self.accepts_power(unit)?;
        for _ in 0..negations {
            result = Expression::Negate(Box::new(result));
        }

        // Construct implicit multiplications as long as the next token is one which can be
        // implicitly multipled with. "2x" will initially parse as "2", then this pass can pick up
        // the "x" and form a multiplication.
        while self.current().map_or(false, Self::starts_unit) {
            let unit = self.parse_unit()?;
            let right = self.accepts_power(unit)?;
            result = Expression::ImplicitMultiply(Box::new(result), Box::new(right));
        }

        Ok(result)
    }

    fn starts_unit(lexeme: &Lexeme) -> bool {
        matches!(
            lexeme,
            Lexeme::Number(_) | Lexeme::Identifier(_) | Lexeme::LeftParenthesis | Lexeme::GroupOpen
            | Lexeme::Sqrt | Lexeme::LeftBracket | Lexeme::Empty
        )
    }

    /// Wraps the return value of `parse_unit`, binding any powers which follow. Exponents bind
    /// to the right, so `a^b^c` is `a^(b^c)`.
    fn accepts_power(&mut self, unit: Expression) -> Result<Expression, ParseError> {
        let mut result = unit;
        loop {
            match self.current() {
                Some(Lexeme::Squared) => {
                    self.advance();
                    result = Expression::Power(
                        Box::new(result),
                        Box::new(Expression::Number(Decimal::from(2u8))),
                    );
                }
                Some(Lexeme::Caret) => {
                    self.advance();
                    let exp = self.parse_exponent()?;
                    return Ok(Expression::Power(Box::new(result), Box::new(exp)));
                }
                _ => return Ok(result),
            }
        }
    }

    /// An exponent is a single, possibly negated, unit with its own powers.
    fn parse_exponent(&mut self) -> Result<Expression, ParseError> {
        if let Some(Lexeme::Subtract) = self.current() {
            self.advance();
            return Ok(Expression::Negate(Box::new(self.parse_exponent()?)));
        }
        let unit = self.parse_unit()?;
        self.accepts_power(unit)
    }

    fn parse_unit(&mut self) -> Result<Expression, ParseError> {
        let Some(lexeme) = self.current() else {
            return Err(ParseError::UnexpectedEnd);
        };
        self.advance();

        match lexeme {
            Lexeme::Number(n) => Ok(Expression::Number(*n)),

            Lexeme::Identifier(name) => {
                if let Some(Lexeme::LeftParenthesis) = self.current() {
                    self.advance();
                    let args = self.parse_arguments()?;
                    return Ok(Expression::FunctionCall(name.clone(), args));
                }

                // Adjacent letters are separate variables multiplied together
                let mut letters = name.chars().map(Expression::Variable);
                let first = letters.next().ok_or(ParseError::UnexpectedToken)?;
                Ok(letters.fold(first, |l, r| Expression::ImplicitMultiply(Box::new(l), Box::new(r))))
            }

            Lexeme::LeftParenthesis => {
                let inner = self.parse_level1()?;
                self.expect(Lexeme::RightParenthesis)?;
                Ok(Expression::Parentheses(Box::new(inner)))
            }

            Lexeme::GroupOpen => {
                let group = self.parse_group()?;

                // In parseable text, a fraction is two groups around a division sign. It binds as
                // one unit, so that neighbouring content stays out of its slots.
                if self.current() == Some(&Lexeme::Divide) && self.lexemes.get(self.index + 1) == Some(&Lexeme::GroupOpen) {
                    self.advance();
                    self.advance();
                    let denominator = self.parse_group()?;
                    return Ok(Expression::Divide(Box::new(group), Box::new(denominator)));
                }
                Ok(group)
            }

            Lexeme::Sqrt => Ok(Expression::Sqrt(Box::new(self.parse_unit()?))),
            Lexeme::LeftBracket => self.parse_matrix(),
            Lexeme::Empty => Ok(Expression::Empty),

            _ => Err(ParseError::UnexpectedToken),
        }
    }

    /// Parses the rest of a group, after the opening system parenthesis has been consumed.
    fn parse_group(&mut self) -> Result<Expression, ParseError> {
        let inner = self.parse_level1()?;
        self.expect(Lexeme::GroupClose)?;
        Ok(Expression::Group(Box::new(inner)))
    }

    /// Parses comma-separated arguments, after the opening parenthesis has been consumed.
    fn parse_arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut args = vec![];
        if let Some(Lexeme::RightParenthesis) = self.current() {
            self.advance();
            return Ok(args);
        }

        loop {
            args.push(self.parse_level1()?);
            match self.current() {
                Some(Lexeme::Comma) => self.advance(),
                Some(Lexeme::RightParenthesis) => {
                    self.advance();
                    return Ok(args);
                }
                Some(_) => return Err(ParseError::UnexpectedToken),
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
    }

    /// Parses `[[a,b][c,d]]`, after the outer opening bracket has been consumed.
    fn parse_matrix(&mut self) -> Result<Expression, ParseError> {
        let mut rows: Vec<Vec<Expression>> = vec![];
        while let Some(Lexeme::LeftBracket) = self.current() {
            self.advance();
            let mut row = vec![self.parse_level1()?];
            while let Some(Lexeme::Comma) = self.current() {
                self.advance();
                row.push(self.parse_level1()?);
            }
            self.expect(Lexeme::RightBracket)?;
            rows.push(row);
        }
        self.expect(Lexeme::RightBracket)?;

        let columns = rows.first().map(|r| r.len()).ok_or(ParseError::MalformedMatrix)?;
        if rows.iter().any(|r| r.len() != columns) {
            return Err(ParseError::MalformedMatrix);
        }
        Ok(Expression::Matrix(rows))
    }
}
