use alloc::vec;

use crate::{
    nav::Direction,
    node::Tree,
    render::{Area, CalculatedPoint, Glyph, Layoutable, Rect},
    renderers::AsciiRenderer,
    tests::util::{editing, editing_empty, fraction_expression, type_text},
    EditSession,
};

#[test]
fn test_ascii_render() {
    let tree = Tree::with_content(atoms!("12+3"));
    assert_eq!(render!(tree), vec!["12+3"]);

    let tree = Tree::with_content(seq![frac!(atoms!("1"), atoms!("23"))]);
    assert_eq!(
        render!(tree),
        vec![
            " 1",
            "--",
            "23",
        ],
    );

    let tree = Tree::with_content(fraction_expression());
    assert_eq!(
        render!(tree),
        vec![
            " 23",
            "1--",
            "  4",
        ],
    );

    let tree = Tree::with_content(seq![
        atoms!("12+"),
        frac!(
            seq![atoms!("34+"), frac!(atoms!("56"), atoms!("78"))],
            atoms!("90"),
        ),
        atoms!("+12"),
    ]);
    assert_eq!(
        render!(tree),
        vec![
            "      56   ",
            "   34+--   ",
            "      78   ",
            "12+-----+12",
            "    90     ",
        ],
    );
}

#[test]
fn test_ascii_render_constructs() {
    let tree = Tree::with_content(seq![power!(atoms!("x"), atoms!("2"))]);
    assert_eq!(
        render!(tree),
        vec![
            " 2",
            "x ",
        ],
    );

    let tree = Tree::with_content(seq![sqrt!(atoms!("4"))]);
    assert_eq!(
        render!(tree),
        vec![
            " .-",
            "\\|4",
        ],
    );

    let tree = Tree::with_content(seq![matrix!(2 x 2: atoms!("1"), atoms!("2"), atoms!("3"), atoms!("4"))]);
    assert_eq!(
        render!(tree),
        vec![
            "[1 2]",
            "[   ]",
            "[3 4]",
        ],
    );
}

#[test]
fn test_render_empty() {
    assert_eq!(render!(EditSession::default()), vec!["□"]);
    assert_eq!(render!(editing_empty()), vec!["|"]);
    assert_eq!(render!(Tree::new()), vec!["□"]);
}

#[test]
fn test_render_cursor() {
    let session = editing(atoms!("12"));
    assert_eq!(render!(session), vec!["12|"]);

    let mut session = editing_empty();
    type_text(&mut session, "/");
    assert_eq!(
        render!(session),
        vec![
            "|□",
            "--",
            " □",
        ],
    );

    // Entering a matrix shows its grey squares
    let mut session = editing_empty();
    type_text(&mut session, "[");
    assert_eq!(
        render!(session),
        vec![
            "[|□ □]",
            "[    ]",
            "[□  □]",
        ],
    );
}

#[test]
fn test_render_selection() {
    let mut session = editing(atoms!("123"));
    session.extend_selection(Direction::Left).unwrap();
    session.extend_selection(Direction::Left).unwrap();

    // Highlights take no space, so text output is unchanged apart from the cursor
    assert_eq!(render!(session), vec!["1|23"]);

    let layout = session.layout(&mut AsciiRenderer::default());
    assert!(layout.glyphs.contains(&(
        Glyph::Highlight { area: Area::new(2, 1) },
        CalculatedPoint { x: 2, y: 0 },
    )));
}

#[test]
fn test_scroll_target() {
    let session = editing(atoms!("12"));
    assert_eq!(
        session.scroll_target(&mut AsciiRenderer::default()),
        Some((Rect { origin: CalculatedPoint { x: 2, y: 0 }, area: Area::new(1, 1) }, 0)),
    );

    let session = editing(fraction_expression());
    let (rect, _) = session.scroll_target(&mut AsciiRenderer::default()).unwrap();
    assert_eq!(rect, Rect { origin: CalculatedPoint { x: 3, y: 0 }, area: Area::new(1, 3) });

    assert_eq!(EditSession::default().scroll_target(&mut AsciiRenderer::default()), None);
}
