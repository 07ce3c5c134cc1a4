//! Implements layout for expression trees, enabling them to be [rendered](crate::render).

use core::cmp::max;
use alloc::vec::Vec;

use crate::{nav::Position, render::{Glyph, LayoutBlock, LayoutMarks, Layoutable, MergeBaseline, Renderer}};

use super::{ConstructKind, NodeId, NodeKind, Token, Tree};

impl Layoutable for Tree {
    fn layout(&self, renderer: &mut impl Renderer) -> LayoutBlock {
        self.layout_node(self.root(), renderer, &LayoutMarks::none())
    }
}

impl Tree {
    /// Lays out a subtree, drawing the cursor and selection given by `marks` where they fall inside
    /// it.
    pub fn layout_node(&self, id: NodeId, renderer: &mut impl Renderer, marks: &LayoutMarks) -> LayoutBlock {
        let block = match self.kind(id) {
            NodeKind::Atomic(token) => LayoutBlock::from_glyph(renderer, (*token).into()),
            NodeKind::Placeholder => self.layout_placeholder(id, renderer, marks),
            NodeKind::Sequence(_) => self.layout_sequence(id, renderer, marks),
            NodeKind::Construct(kind, slots) => {
                let mut slot_layouts = slots
                    .iter()
                    .map(|s| self.layout_node(*s, renderer, marks))
                    .collect::<Vec<_>>();

                match kind {
                    ConstructKind::Fraction => {
                        let bottom = slot_layouts.remove(1);
                        let top = slot_layouts.remove(0);
                        layout_fraction(top, bottom, renderer)
                    }
                    ConstructKind::Power => {
                        let exp = slot_layouts.remove(1);
                        let base = slot_layouts.remove(0);
                        layout_power(base, exp)
                    }
                    ConstructKind::SquareRoot => layout_sqrt(slot_layouts.remove(0), renderer),
                    ConstructKind::Matrix { rows, columns, .. }
                        => layout_matrix(&slot_layouts, *rows, *columns, renderer),
                }
            }
        };

        // Nodes inside a sequence are highlighted as part of their sequence's selected range
        let in_sequence = self.parent(id).map_or(false, |p| self.is_sequence(p));
        if marks.selection.is_whole(id) && !in_sequence {
            block.highlighted()
        } else {
            block
        }
    }

    fn layout_placeholder(&self, id: NodeId, renderer: &mut impl Renderer, marks: &LayoutMarks) -> LayoutBlock {
        let placeholder = LayoutBlock::from_glyph(renderer, Glyph::Placeholder);
        if marks.cursor != Some(Position::Slot(id)) {
            return placeholder;
        }

        let mut cursor = LayoutBlock::from_glyph(renderer, Glyph::Cursor {
            height: placeholder.area.height,
            baseline: placeholder.baseline,
        });
        cursor.baseline = placeholder.baseline;
        LayoutBlock::layout_horizontal(&[cursor, placeholder])
    }

    fn layout_sequence(&self, id: NodeId, renderer: &mut impl Renderer, marks: &LayoutMarks) -> LayoutBlock {
        let mut layouts = self.content(id)
            .iter()
            .map(|c| self.layout_node(*c, renderer, marks))
            .collect::<Vec<_>>();

        let mut cursor_insertion_index = match marks.cursor {
            Some(Position::Within { sequence, index }) if sequence == id => Some(index),
            _ => None,
        };

        // Collapse a selected range into one highlighted block
        if let Some((first, last)) = marks.selection.range_in(self, id) {
            let selected = layouts.drain(first..=last).collect::<Vec<_>>();
            layouts.insert(first, LayoutBlock::layout_horizontal(&selected).highlighted());
            cursor_insertion_index = cursor_insertion_index
                .map(|i| if i > last { i - (last - first) } else { i });
        }

        // If the cursor is here, insert it
        if let Some(idx) = cursor_insertion_index {
            // Get the layout to match the size to
            let digit_layout;
            let cursor_match_layout = if layouts.is_empty() {
                // Our default size will be that of the digit 0
                digit_layout = LayoutBlock::from_glyph(renderer, Glyph::Token(Token::Digit(0)));
                &digit_layout
            } else if idx == 0 {
                &layouts[idx]
            } else if idx == layouts.len() {
                &layouts[idx - 1]
            } else {
                let after = &layouts[idx];
                let before = &layouts[idx - 1];

                if after.area.height > before.area.height {
                    after
                } else {
                    before
                }
            };
            let height = cursor_match_layout.area.height;
            let baseline = cursor_match_layout.baseline;

            // Hackily match the baseline
            let mut cursor_layout = LayoutBlock::from_glyph(renderer, Glyph::Cursor { height, baseline });
            cursor_layout.baseline = baseline;

            layouts.insert(idx, cursor_layout)
        }

        // If the sequence is still empty (it had no content, and the cursor's not in it) then
        // insert a placeholder
        if layouts.is_empty() {
            layouts.push(LayoutBlock::from_glyph(renderer, Glyph::Placeholder))
        }

        LayoutBlock::layout_horizontal(&layouts)
    }
}

fn layout_fraction(top: LayoutBlock, bottom: LayoutBlock, renderer: &mut impl Renderer) -> LayoutBlock {
    // The fraction line should be the widest of the two
    let line_width = max(top.area.width, bottom.area.width);
    let line = LayoutBlock::from_glyph(renderer, Glyph::Fraction {
        inner_width: line_width
    }).move_below_other(&top);

    let bottom = bottom.move_below_other(&line);

    top
        .merge_along_vertical_centre(&line, MergeBaseline::OtherAsBaseline)
        .merge_along_vertical_centre(&bottom, MergeBaseline::SelfAsBaseline)
}

fn layout_power(base: LayoutBlock, exp: LayoutBlock) -> LayoutBlock {
    // Offsets can't be negative, so rather than moving the exponent up, move the base down by the
    // height of the exponent and the exponent right by the width of the base
    let base = base.offset(0, exp.area.height);
    let exp = exp.offset(base.area.width, 0);
    base.merge_in_place(&exp, MergeBaseline::SelfAsBaseline)
}

fn layout_sqrt(inner: LayoutBlock, renderer: &mut impl Renderer) -> LayoutBlock {
    let symbol = LayoutBlock::from_glyph(renderer, Glyph::Sqrt { inner_area: inner.area });

    // We assume that the inner layout goes in the very bottom right, so work out the
    // offset required based on the difference of the two areas
    let x_offset = symbol.area.width - inner.area.width;
    let y_offset = symbol.area.height - inner.area.height;

    symbol.merge_in_place(&inner.offset(x_offset, y_offset), MergeBaseline::OtherAsBaseline)
}

fn layout_matrix(cells: &[LayoutBlock], rows: usize, columns: usize, renderer: &mut impl Renderer) -> LayoutBlock {
    let spacing = renderer.matrix_cell_spacing();

    let column_widths = (0..columns)
        .map(|c| (0..rows).map(|r| cells[r * columns + c].area.width).max().unwrap_or(0))
        .collect::<Vec<_>>();

    // Each row is aligned along its own baseline, with cells centred in their column
    let mut grid = LayoutBlock::empty();
    let mut y = 0;
    for r in 0..rows {
        let mut row = LayoutBlock::empty();
        let mut x = 0;
        for (c, width) in column_widths.iter().enumerate() {
            let cell = &cells[r * columns + c];
            row = row.merge_along_baseline(&cell.offset(x + (width - cell.area.width) / 2, 0));
            x += width + spacing;
        }

        grid = grid.merge_in_place(&row.offset(0, y), MergeBaseline::SelfAsBaseline);
        y += row.area.height + spacing;
    }

    let height = grid.area.height;
    let left = LayoutBlock::from_glyph(renderer, Glyph::LeftBracket { inner_height: height });
    let grid = grid.move_right_of_other(&left);
    let right = LayoutBlock::from_glyph(renderer, Glyph::RightBracket { inner_height: height })
        .move_right_of_other(&grid);

    let mut block = left
        .merge_in_place(&grid, MergeBaseline::OtherAsBaseline)
        .merge_in_place(&right, MergeBaseline::SelfAsBaseline);
    block.baseline = block.area.height / 2;
    block
}
