use alloc::{string::String, vec::Vec};

use crate::render::{Renderer, CalculatedPoint, Area, Glyph};

/// Draws onto a grid of characters, one glyph cell per character. Useful for tests and terminals.
#[derive(Default, Clone, Debug)]
pub struct AsciiRenderer {
    pub lines: Vec<String>,
}

impl AsciiRenderer {
    fn put_char(&mut self, char: char, point: CalculatedPoint) {
        let line = &mut self.lines[point.y as usize];
        *line = line
            .chars()
            .enumerate()
            .map(|(i, c)| if i == point.x as usize { char } else { c })
            .collect();
    }
}

impl Renderer for AsciiRenderer {
    fn size(&mut self, glyph: Glyph) -> Area {
        match glyph {
            Glyph::Token(_) | Glyph::Placeholder => Area::square(1),

            Glyph::Fraction { inner_width } => Area::new(inner_width, 1),

            // Radicand sits in the bottom right, under the bar and right of the tick
            Glyph::Sqrt { inner_area } => Area::new(inner_area.width + 2, inner_area.height + 1),

            Glyph::LeftBracket { inner_height } | Glyph::RightBracket { inner_height }
                => Area::new(1, inner_height),

            Glyph::Cursor { height, .. } => Area::new(1, height),

            Glyph::Highlight { area } => area,
        }
    }

    fn init(&mut self, size: Area) {
        self.lines = Vec::new();
        for _ in 0..size.height {
            self.lines.push(" ".repeat(size.width as usize));
        }
    }

    fn draw(&mut self, glyph: Glyph, point: CalculatedPoint) {
        match glyph {
            Glyph::Token(token) => self.put_char(token.to_char(), point),
            Glyph::Placeholder => self.put_char('□', point),
            Glyph::Fraction { inner_width } => {
                for dx in 0..inner_width {
                    self.put_char('-', point.dx(dx as i64))
                }
            },
            Glyph::LeftBracket { inner_height } | Glyph::RightBracket { inner_height } => {
                let char = if matches!(glyph, Glyph::LeftBracket { .. }) { '[' } else { ']' };
                for dy in 0..inner_height {
                    self.put_char(char, point.dy(dy as i64));
                }
            },
            Glyph::Sqrt { inner_area } => {
                self.put_char('\\', CalculatedPoint {
                    x: point.x,
                    y: point.y + inner_area.height,
                });
                for dy in 1..=inner_area.height {
                    self.put_char('|', point.dx(1).dy(dy as i64));
                }
                self.put_char('.', point.dx(1));
                for dx in 2..(2+inner_area.width) {
                    self.put_char('-', point.dx(dx as i64));
                }
            },
            Glyph::Cursor { height, .. } => {
                for dy in 0..height {
                    self.put_char('|', point.dy(dy as i64))
                }
            },

            // Characters have no background to shade
            Glyph::Highlight { .. } => (),
        }
    }
}
