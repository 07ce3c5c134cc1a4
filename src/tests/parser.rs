use crate::{error::ParseError, node::Tree, parser::{ExpressionParser, Parse}};

fn parse(text: &str) -> Result<crate::Fragment, ParseError> {
    ExpressionParser.parse(text)
}

#[test]
fn test_parse_flat() {
    assert_eq!(parse("12+3"), Ok(atoms!("12+3")));
    assert_eq!(parse("2x"), Ok(atoms!("2x")));
    assert_eq!(parse("2 * 3"), Ok(atoms!("2×3")));
    assert_eq!(parse("-3"), Ok(atoms!("-3")));
    assert_eq!(parse("--3"), Ok(atoms!("--3")));
    assert_eq!(parse("f(x,y)"), Ok(atoms!("f(x,y)")));
    assert_eq!(parse("sin()"), Ok(atoms!("sin()")));
}

#[test]
fn test_parse_numbers() {
    assert_eq!(parse(".5"), Ok(atoms!("0.5")));
    assert_eq!(parse("3."), Ok(atoms!("3")));
    assert_eq!(parse("007"), Ok(atoms!("7")));
    assert_eq!(parse("1..2"), Err(ParseError::MalformedNumber));
    assert_eq!(parse("."), Err(ParseError::MalformedNumber));

    // Numbers are never rounded
    assert_eq!(
        parse("0.1234567890123456789012345678"),
        Ok(atoms!("0.1234567890123456789012345678")),
    );
    assert_eq!(
        parse("0.123456789012345678901234567891"),
        Err(ParseError::NumberOutOfRange),
    );
}

#[test]
fn test_parse_constructs() {
    assert_eq!(parse("1/2"), Ok(seq![frac!(atoms!("1"), atoms!("2"))]));
    assert_eq!(parse("(1+2)/3"), Ok(seq![frac!(atoms!("1+2"), atoms!("3"))]));
    assert_eq!(parse("x^2"), Ok(seq![power!(atoms!("x"), atoms!("2"))]));
    assert_eq!(parse("x²"), parse("x^2"));
    assert_eq!(parse("2^-1"), Ok(seq![power!(atoms!("2"), atoms!("-1"))]));
    assert_eq!(parse("√(4)"), Ok(seq![sqrt!(atoms!("4"))]));
    assert_eq!(parse("√4x"), Ok(seq![sqrt!(atoms!("4")), atom!('x')]));
    assert_eq!(
        parse("[[1,2][3,4]]"),
        Ok(seq![matrix!(2 x 2: atoms!("1"), atoms!("2"), atoms!("3"), atoms!("4"))]),
    );
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse(""), Err(ParseError::UnexpectedEnd));
    assert_eq!(parse("1+"), Err(ParseError::UnexpectedEnd));
    assert_eq!(parse("(1"), Err(ParseError::UnexpectedEnd));
    assert_eq!(parse("1)"), Err(ParseError::UnexpectedTokensAtEnd));
    assert_eq!(parse("$"), Err(ParseError::UnexpectedCharacter('$')));
    assert_eq!(parse("+"), Err(ParseError::UnexpectedToken));
    assert_eq!(parse("[[1,2][3]]"), Err(ParseError::MalformedMatrix));
    assert_eq!(parse("[]"), Err(ParseError::MalformedMatrix));
}

#[test]
fn test_parse_control_markers() {
    assert_eq!(parse("\u{11}"), Ok(seq![]));
    assert_eq!(
        parse("\u{12}\u{11}\u{13}/\u{12}\u{11}\u{13}"),
        Ok(seq![frac!(ph!(), ph!())]),
    );

    // Groups keep neighbouring content out of a fraction's slots
    assert_eq!(
        parse("2\u{12}a\u{13}/\u{12}b\u{13}c"),
        Ok(seq![atom!('2'), frac!(atoms!("a"), atoms!("b")), atom!('c')]),
    );
}

#[test]
fn test_parseable_round_trip() {
    let expression = seq![
        atom!('2'),
        power!(atoms!("x"), atoms!("2")),
        atom!('+'),
        frac!(atoms!("1+2"), ph!()),
        sqrt!(atoms!("y")),
    ];
    let tree = Tree::with_content(expression.clone());
    let text = tree.serialize_parseable(tree.root());
    assert_eq!(parse(&text), Ok(expression));

    let matrix = seq![matrix!(2 x 2: atoms!("1"), ph!(), frac!(atoms!("1"), atoms!("2")), atoms!("4"))];
    let tree = Tree::with_content(matrix);
    let text = tree.serialize_parseable(tree.root());
    assert_eq!(parse(&text), Ok(tree.to_fragment(tree.root())));
}
