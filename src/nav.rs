//! Cursor addressing and movement.
//!
//! A [Cursor] names a node and a side of it. Many cursors can describe the same visual position:
//! the right of one atom is the left of the next. [Cursor::position] reduces a cursor to the
//! [Position] it actually denotes, which is what editing operations work from.

use alloc::{vec, vec::Vec};

use crate::{node::{NodeId, NodeKind, Tree, VerticalLanding}, render::{Dimension, Glyph, LayoutBlock, LayoutMarks, Renderer}};

#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// The side of a node which lies in this direction. Only meaningful for horizontal directions.
    fn side(self) -> Side {
        match self {
            Direction::Left | Direction::Up => Side::Left,
            Direction::Right | Direction::Down => Side::Right,
        }
    }
}

/// A node and a side of it.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Cursor {
    pub node: NodeId,
    pub side: Side,
}

/// The place a cursor denotes.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Position {
    /// Between children `index - 1` and `index` of a sequence.
    Within { sequence: NodeId, index: usize },

    /// An empty construct slot, represented by its placeholder.
    Slot(NodeId),
}

impl Cursor {
    pub fn new(node: NodeId, side: Side) -> Self {
        Cursor { node, side }
    }

    /// The canonical cursor for a position. Within a sequence, this is the right of the preceding
    /// child, or the left of the sequence itself if there is none.
    pub fn at(tree: &Tree, position: Position) -> Cursor {
        match position {
            Position::Within { sequence, index: 0 } => Cursor::new(sequence, Side::Left),
            Position::Within { sequence, index } => Cursor::new(tree.children(sequence)[index - 1], Side::Right),
            Position::Slot(placeholder) => Cursor::new(placeholder, Side::Left),
        }
    }

    /// The position this cursor denotes.
    pub fn position(&self, tree: &Tree) -> Position {
        match tree.kind(self.node) {
            NodeKind::Sequence(_) => Position::Within {
                sequence: self.node,
                index: match self.side {
                    Side::Left => 0,
                    Side::Right => tree.content(self.node).len(),
                },
            },

            NodeKind::Placeholder => match tree.parent(self.node) {
                // Only the empty root holds a placeholder in a sequence
                Some(parent) if tree.is_sequence(parent) => Position::Within { sequence: parent, index: 0 },
                _ => Position::Slot(self.node),
            },

            NodeKind::Atomic(_) | NodeKind::Construct(_, _) => {
                let parent = tree.parent(self.node).expect("content node outside a sequence");
                let index = tree.index_in_parent(self.node).unwrap_or(0);
                Position::Within {
                    sequence: parent,
                    index: match self.side {
                        Side::Left => index,
                        Side::Right => index + 1,
                    },
                }
            }
        }
    }

    /// Returns this cursor in canonical form.
    pub fn canonical(&self, tree: &Tree) -> Cursor {
        Cursor::at(tree, self.position(tree))
    }

    /// Returns true if two cursors denote the same position.
    pub fn is_equivalent_to(&self, other: &Cursor, tree: &Tree) -> bool {
        self.position(tree) == other.position(tree)
    }

    /// A different cursor denoting the same position, or `None` if there is no other way to
    /// address it. Used to keep the cursor valid when the node it names is about to be discarded.
    pub fn equivalent(&self, tree: &Tree) -> Option<Cursor> {
        match tree.kind(self.node) {
            NodeKind::Sequence(_) => {
                let content = tree.content(self.node);
                match self.side {
                    Side::Left => content.first().map(|c| Cursor::new(*c, Side::Left)),
                    Side::Right => content.last().map(|c| Cursor::new(*c, Side::Right)),
                }
            }

            NodeKind::Placeholder => match tree.parent(self.node) {
                Some(parent) if tree.is_sequence(parent) => Some(Cursor::new(parent, Side::Left)),
                _ => None,
            },

            NodeKind::Atomic(_) | NodeKind::Construct(_, _) => {
                let parent = tree.parent(self.node)?;
                let index = tree.index_in_parent(self.node)?;
                let siblings = tree.children(parent);
                Some(match self.side {
                    Side::Left if index > 0 => Cursor::new(siblings[index - 1], Side::Right),
                    Side::Right if index + 1 < siblings.len() => Cursor::new(siblings[index + 1], Side::Left),
                    side => Cursor::new(parent, side),
                })
            }
        }
    }
}

impl Tree {
    /// The cursor at the start or end of a slot child (or the root).
    pub fn cursor_at_edge(&self, slot_child: NodeId, side: Side) -> Cursor {
        match self.kind(slot_child) {
            NodeKind::Placeholder => Cursor::new(slot_child, Side::Left),
            _ => Cursor::new(slot_child, side).canonical(self),
        }
    }

    fn cursor_in_slot(&self, slot_child: NodeId, index: usize) -> Cursor {
        match self.kind(slot_child) {
            NodeKind::Placeholder => Cursor::new(slot_child, Side::Left),
            _ => Cursor::at(self, Position::Within { sequence: slot_child, index }),
        }
    }

    /// Computes where the cursor ends up after moving one step in a direction, or `None` if it
    /// cannot move that way. Vertical movement needs a renderer to line up horizontal positions.
    pub fn cursor_at_direction(&self, cursor: Cursor, direction: Direction, renderer: &mut impl Renderer) -> Option<Cursor> {
        if direction.is_horizontal() {
            self.cursor_at_horizontal(cursor, direction)
        } else {
            self.cursor_at_vertical(cursor, direction, renderer)
        }
    }

    fn cursor_at_horizontal(&self, cursor: Cursor, direction: Direction) -> Option<Cursor> {
        let (sequence, index) = match cursor.position(self) {
            Position::Within { sequence, index } => (sequence, index),
            Position::Slot(placeholder) => return self.cursor_leaving_slot(placeholder, direction),
        };

        let content = self.content(sequence);
        let neighbour = match direction {
            Direction::Right => content.get(index),
            _ => index.checked_sub(1).and_then(|i| content.get(i)),
        };

        let Some(&neighbour) = neighbour else {
            return self.cursor_leaving_slot(sequence, direction);
        };

        match self.kind(neighbour) {
            NodeKind::Construct(kind, slots) => {
                // Crossing into a construct from its left edge lands at the start of its entry
                // slot, and vice versa
                let entering_from = direction.side().opposite();
                let slot = slots[kind.entry_slot(entering_from)];
                Some(self.cursor_at_edge(slot, entering_from))
            }
            _ => {
                let index = match direction {
                    Direction::Right => index + 1,
                    _ => index - 1,
                };
                Some(Cursor::at(self, Position::Within { sequence, index }))
            }
        }
    }

    /// Moves horizontally out of the edge of a slot child, either into a neighbouring slot or out
    /// of the construct entirely. The root has no enclosing construct, so there is no movement.
    fn cursor_leaving_slot(&self, slot_child: NodeId, direction: Direction) -> Option<Cursor> {
        let construct = self.parent(slot_child)?;
        let NodeKind::Construct(kind, slots) = self.kind(construct) else {
            return None;
        };
        let slot = self.index_in_parent(slot_child)?;

        if let Some(next) = kind.horizontal_neighbour(slot, direction) {
            return Some(self.cursor_at_edge(slots[next], direction.side().opposite()));
        }
        Some(Cursor::new(construct, direction.side()).canonical(self))
    }

    fn cursor_at_vertical(&self, cursor: Cursor, direction: Direction, renderer: &mut impl Renderer) -> Option<Cursor> {
        let (mut current, mut index) = match cursor.position(self) {
            Position::Within { sequence, index } => (sequence, index),
            Position::Slot(placeholder) => (placeholder, 0),
        };

        // Walk outwards until a construct has a slot in this direction
        loop {
            let parent = self.parent(current)?;
            match self.kind(parent) {
                NodeKind::Construct(kind, slots) => {
                    let slot = self.index_in_parent(current)?;
                    if let Some((target_slot, landing)) = kind.vertical_neighbour(slot, direction) {
                        let target = slots[target_slot];
                        let new_index = match landing {
                            VerticalLanding::Start => 0,
                            VerticalLanding::End => self.content(target).len(),
                            VerticalLanding::Matched { centred } => {
                                let points = self.match_vertical_cursor_points(renderer, current, target, centred);
                                points.get(index).copied().unwrap_or(0)
                            }
                        };
                        return Some(self.cursor_in_slot(target, new_index));
                    }
                    current = parent;
                    index = 0;
                }
                _ => {
                    index = self.index_in_parent(current)?;
                    current = parent;
                }
            }
        }
    }

    /// Boundary points between the items of a slot child, or a single point in the middle of a
    /// placeholder. Also returns the total width.
    fn slot_boundary_points(&self, renderer: &mut impl Renderer, slot_child: NodeId) -> (Vec<Dimension>, Dimension) {
        if self.is_placeholder(slot_child) {
            let width = LayoutBlock::from_glyph(renderer, Glyph::Placeholder).area.width;
            return (vec![width / 2], width);
        }

        let mut points = vec![0];
        for child in self.content(slot_child) {
            let width = self.layout_node(*child, renderer, &LayoutMarks::none()).area.width;
            points.push(points.last().copied().unwrap_or(0) + width);
        }
        let total = points.last().copied().unwrap_or(0);
        (points, total)
    }

    /// For each cursor index in `from`, finds the closest cursor index in `to`.
    fn match_vertical_cursor_points(&self, renderer: &mut impl Renderer, from: NodeId, to: NodeId, centred: bool) -> Vec<usize> {
        let (from_points, from_total_width) = self.slot_boundary_points(renderer, from);
        let (to_points, to_total_width) = self.slot_boundary_points(renderer, to);

        // Calculate some offsets to horizontally centre them
        let (from_offset, to_offset) = if !centred {
            (0, 0)
        } else if from_total_width < to_total_width {
            ((to_total_width - from_total_width) / 2, 0)
        } else {
            (0, (from_total_width - to_total_width) / 2)
        };

        // Go through each "from" point, and find the closest "to" point
        let mut result = vec![];
        for from_point in from_points {
            let from_point = (from_point + from_offset) as i64;
            let mut closest = 0;
            let mut best_distance = i64::MAX;

            for (i, to_point) in to_points.iter().enumerate() {
                let distance = ((to_point + to_offset) as i64 - from_point).abs();
                if distance < best_distance {
                    closest = i;
                    best_distance = distance;
                }
            }

            result.push(closest);
        }

        result
    }
}
