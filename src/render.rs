//! Layout and rendering of expression trees.
//!
//! Rendering happens in two stages. First, a tree is *laid out* into a [LayoutBlock], which is a
//! flat list of [Glyph]s at calculated points, with an overall area and a baseline. The sizes of
//! glyphs are decided by a [Renderer], so the same tree can be laid out for any kind of surface.
//! Then, the renderer draws each glyph.

use core::cmp::max;
use alloc::{vec::Vec, vec};

use crate::{node::Token, nav::Position, selection::Selection};

pub type Dimension = u64;

/// Used when the layout has been calculated, where points are relative to the top-left of a block.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct CalculatedPoint {
    pub x: Dimension,
    pub y: Dimension,
}

impl CalculatedPoint {
    pub fn dx(&self, delta: i64) -> CalculatedPoint {
        CalculatedPoint { x: (self.x as i64 + delta) as u64, y: self.y }
    }

    pub fn dy(&self, delta: i64) -> CalculatedPoint {
        CalculatedPoint { x: self.x, y: (self.y as i64 + delta) as u64 }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Area {
    pub width: Dimension,
    pub height: Dimension,
}

impl Area {
    pub fn new(width: Dimension, height: Dimension) -> Area {
        Area { width, height }
    }

    pub fn square(size: Dimension) -> Area {
        Area { width: size, height: size }
    }
}

/// An area at a particular point.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Rect {
    pub origin: CalculatedPoint,
    pub area: Area,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Glyph {
    Token(Token),

    /// An empty slot.
    Placeholder,

    Fraction { inner_width: Dimension },

    Sqrt { inner_area: Area },

    /// Opening bracket of a matrix.
    LeftBracket { inner_height: Dimension },

    /// Closing bracket of a matrix.
    RightBracket { inner_height: Dimension },

    /// The editing cursor. `baseline` is the baseline of the content it was sized against.
    Cursor { height: Dimension, baseline: Dimension },

    /// Marks an area as selected. Always comes before the glyphs it covers, so renderers which
    /// fill a background can draw over it.
    Highlight { area: Area },
}

impl From<Token> for Glyph {
    fn from(token: Token) -> Self {
        Glyph::Token(token)
    }
}

/// A laid-out set of glyphs. Points are relative to the top-left of the block.
#[derive(Debug, Clone)]
pub struct LayoutBlock {
    pub glyphs: Vec<(Glyph, CalculatedPoint)>,
    pub baseline: Dimension,
    pub area: Area,
}

pub enum MergeBaseline {
    SelfAsBaseline,
    OtherAsBaseline,
}

impl LayoutBlock {
    pub fn empty() -> LayoutBlock {
        LayoutBlock { glyphs: vec![], baseline: 0, area: Area::new(0, 0) }
    }

    /// Creates a new layout block with one glyph at the origin. The baseline is the centre of this
    /// glyph.
    pub fn from_glyph(renderer: &mut impl Renderer, glyph: Glyph) -> LayoutBlock {
        let area = renderer.size(glyph);
        LayoutBlock {
            glyphs: vec![(glyph, CalculatedPoint { x: 0, y: 0 })],
            baseline: area.height / 2,
            area,
        }
    }

    pub fn offset(&self, dx: Dimension, dy: Dimension) -> LayoutBlock {
        LayoutBlock {
            glyphs: self.glyphs
                .iter()
                .map(|(g, p)| (*g, p.dx(dx as i64).dy(dy as i64)))
                .collect(),
            baseline: self.baseline + dy,
            area: Area::new(self.area.width + dx, self.area.height + dy),
        }
    }

    /// Merges two blocks so that their baselines line up. Glyphs of `self` stay before glyphs of
    /// `other`.
    pub fn merge_along_baseline(&self, other: &LayoutBlock) -> LayoutBlock {
        // The points can't go negative, so the block with the lesser baseline is moved down
        if self.baseline < other.baseline {
            let difference = other.baseline - self.baseline;
            self.offset(0, difference).merge_in_place(other, MergeBaseline::OtherAsBaseline)
        } else {
            let difference = self.baseline - other.baseline;
            self.merge_in_place(&other.offset(0, difference), MergeBaseline::SelfAsBaseline)
        }
    }

    /// Merges the glyphs of two layout blocks along their vertical centre.
    pub fn merge_along_vertical_centre(&self, other: &LayoutBlock, baseline: MergeBaseline) -> LayoutBlock {
        let self_centre = self.area.width / 2;
        let other_centre = other.area.width / 2;

        if self_centre < other_centre {
            self.offset(other_centre - self_centre, 0).merge_in_place(other, baseline)
        } else {
            self.merge_in_place(&other.offset(self_centre - other_centre, 0), baseline)
        }
    }

    /// Merge the the glyphs of two layout blocks exactly, without moving them.
    pub fn merge_in_place(&self, other: &LayoutBlock, baseline: MergeBaseline) -> LayoutBlock {
        let glyphs = self.glyphs
            .iter()
            .cloned()
            .chain(other.glyphs.iter().cloned())
            .collect::<Vec<_>>();

        LayoutBlock {
            glyphs,
            baseline: match baseline {
                MergeBaseline::SelfAsBaseline => self.baseline,
                MergeBaseline::OtherAsBaseline => other.baseline,
            },
            area: Area::new(
                max(self.area.width, other.area.width),
                max(self.area.height, other.area.height),
            ),
        }
    }

    /// Assuming that two layout blocks start at the same point, returns a clone of this block moved
    /// directly to the right of another layout block.
    pub fn move_right_of_other(&self, other: &LayoutBlock) -> LayoutBlock {
        self.offset(other.area.width, 0)
    }

    /// Assuming that two layout blocks start at the same point, returns a clone of this block moved
    /// directly below another layout block.
    pub fn move_below_other(&self, other: &LayoutBlock) -> LayoutBlock {
        self.offset(0, other.area.height)
    }

    /// Lays out blocks left-to-right, aligned along their baselines.
    pub fn layout_horizontal(layouts: &[LayoutBlock]) -> LayoutBlock {
        let mut block = LayoutBlock::empty();
        for layout in layouts {
            block = block.merge_along_baseline(&layout.move_right_of_other(&block));
        }
        block
    }

    /// Returns this block with a [Glyph::Highlight] covering it.
    pub fn highlighted(self) -> LayoutBlock {
        let mut glyphs = vec![(Glyph::Highlight { area: self.area }, CalculatedPoint::default())];
        glyphs.extend(self.glyphs);
        LayoutBlock { glyphs, ..self }
    }

    /// Finds the cursor in this block, returning the rectangle it occupies and its baseline
    /// relative to the top of that rectangle.
    pub fn cursor_rect(&self, renderer: &mut impl Renderer) -> Option<(Rect, Dimension)> {
        self.glyphs.iter().find_map(|(glyph, point)| match glyph {
            Glyph::Cursor { baseline, .. } => Some((
                Rect { origin: *point, area: renderer.size(*glyph) },
                *baseline,
            )),
            _ => None,
        })
    }
}

/// What to mark in a layout, besides the content itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutMarks {
    /// Where to draw the cursor, if anywhere.
    pub cursor: Option<Position>,

    /// Which nodes to highlight.
    pub selection: Selection,
}

impl LayoutMarks {
    pub fn none() -> LayoutMarks {
        LayoutMarks::default()
    }
}

pub trait Renderer {
    /// Given a glyph, returns the size that it will be drawn at. This is used to calculate the
    /// layout of the nodes before they are drawn.
    fn size(&mut self, glyph: Glyph) -> Area;

    /// Prepare a draw surface of the given size.
    fn init(&mut self, size: Area);

    /// Draw a glyph at a specific point.
    fn draw(&mut self, glyph: Glyph, point: CalculatedPoint);

    /// The gap left between adjacent matrix cells, both horizontally and vertically.
    fn matrix_cell_spacing(&mut self) -> Dimension {
        1
    }

    /// Initialises the graphics surface and draws a layoutable item onto it.
    fn draw_all(&mut self, item: &impl Layoutable) where Self: Sized {
        let layout = item.layout(self);
        self.init(layout.area);
        for (glyph, point) in layout.glyphs {
            self.draw(glyph, point);
        }
    }
}

/// Implemented by types which can be laid out into glyphs.
pub trait Layoutable {
    fn layout(&self, renderer: &mut impl Renderer) -> LayoutBlock;
}
