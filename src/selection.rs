//! Selections, and how they grow and shrink as the user extends them.
//!
//! A selection is either empty, or a contiguous run of siblings from `start` to `end` inclusive.
//! A selection where `start == end` and the node is not inside a sequence (a slot child or the
//! root) is a *whole-subtree* selection of that node.

use log::trace;

use crate::{nav::{Cursor, Direction, Position, Side}, node::{NodeId, Tree}};

#[derive(PartialEq, Eq, Debug, Copy, Clone, Default)]
pub enum Selection {
    #[default]
    Empty,
    Span { start: NodeId, end: NodeId },
}

/// How a candidate node relates to the current selection. Decides which transition
/// [Selection::add] performs.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum SelectionRelation {
    /// There is no selection yet.
    Empty,

    /// The candidate comes after the end of the selection in document order.
    AfterEnd,

    /// The candidate comes before the start of the selection in document order.
    BeforeStart,

    /// The candidate is the only selected node.
    EqualsBoth,

    /// The candidate is the last selected node.
    EqualsEnd,

    /// The candidate is the first selected node.
    EqualsStart,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// Returns true if exactly this one node is selected.
    pub fn is_whole(&self, id: NodeId) -> bool {
        matches!(self, Selection::Span { start, end } if *start == id && *end == id)
    }

    pub fn bounds(&self) -> Option<(NodeId, NodeId)> {
        match *self {
            Selection::Empty => None,
            Selection::Span { start, end } => Some((start, end)),
        }
    }

    /// If this selection is a range of children of `sequence`, returns the inclusive range of
    /// child indices.
    pub fn range_in(&self, tree: &Tree, sequence: NodeId) -> Option<(usize, usize)> {
        let (start, end) = self.bounds()?;
        if tree.parent(start) != Some(sequence) || !tree.is_sequence(sequence) {
            return None;
        }
        Some((tree.index_in_parent(start)?, tree.index_in_parent(end)?))
    }

    /// Classifies a candidate node against this selection.
    ///
    /// Panics if the candidate lies strictly inside the selection, which the selection movement
    /// rules never produce.
    pub fn relation(&self, tree: &Tree, candidate: NodeId) -> SelectionRelation {
        let Selection::Span { start, end } = *self else {
            return SelectionRelation::Empty;
        };

        if tree.is_before(end, candidate, true) {
            SelectionRelation::AfterEnd
        } else if tree.is_before(candidate, start, true) {
            SelectionRelation::BeforeStart
        } else if candidate == start && candidate == end {
            SelectionRelation::EqualsBoth
        } else if candidate == end {
            SelectionRelation::EqualsEnd
        } else if candidate == start {
            SelectionRelation::EqualsStart
        } else {
            panic!("selection candidate lies strictly inside the selection")
        }
    }

    /// Adds a candidate node to the selection, growing or shrinking it depending on where the
    /// candidate lies.
    pub fn add(&mut self, tree: &Tree, candidate: NodeId) {
        let relation = self.relation(tree, candidate);
        trace!("adding {:?} to selection {:?}: {:?}", candidate, self, relation);

        let Selection::Span { start, end } = *self else {
            *self = Selection::Span { start: candidate, end: candidate };
            return;
        };

        match relation {
            SelectionRelation::Empty => unreachable!(),

            SelectionRelation::AfterEnd => {
                if tree.parent(candidate) == Some(start) {
                    // A whole sequence is selected and the candidate is one of its children.
                    // Convert the selection into the equivalent range of children, then retry.
                    let content = tree.content(start);
                    if let (Some(first), Some(last)) = (content.first(), content.last()) {
                        *self = Selection::Span { start: *first, end: *last };
                        self.add(tree, candidate);
                    }
                } else {
                    *self = Selection::Span { start, end: candidate };
                }
            }

            SelectionRelation::BeforeStart => {
                if tree.has_ancestor(start, candidate, true) {
                    // The candidate encloses the selection, so it replaces it
                    *self = Selection::Span { start: candidate, end: candidate };
                } else {
                    *self = Selection::Span { start: candidate, end };
                }
            }

            SelectionRelation::EqualsBoth => *self = Selection::Empty,

            SelectionRelation::EqualsEnd => {
                *self = match sibling(tree, end, false) {
                    Some(previous) => Selection::Span { start, end: previous },
                    None => Selection::Empty,
                };
            }

            SelectionRelation::EqualsStart => {
                *self = match sibling(tree, start, true) {
                    Some(next) => Selection::Span { start: next, end },
                    None => Selection::Empty,
                };
            }
        }
    }

    /// Clears the selection. Returns true if there was anything selected.
    pub fn reset(&mut self) -> bool {
        let was_selecting = !self.is_empty();
        *self = Selection::Empty;
        was_selecting
    }
}

/// The next or previous sibling of a node.
fn sibling(tree: &Tree, id: NodeId, next: bool) -> Option<NodeId> {
    let siblings = tree.children(tree.parent(id)?);
    let index = tree.index_in_parent(id)?;
    let index = if next { index + 1 } else { index.checked_sub(1)? };
    siblings.get(index).copied()
}

/// Computes how extending the selection in a direction moves the cursor, and which node is
/// offered to [Selection::add]. Returns `None` if the selection cannot be extended that way.
///
/// Horizontally, the candidate is the node the cursor passes over. At the edge of a slot, that is
/// the whole enclosing construct. Vertically, the candidate is the whole slot (or root) the cursor
/// is in, or the enclosing construct if that slot is already selected.
pub fn select_at_direction(tree: &Tree, cursor: Cursor, selection: Selection, direction: Direction) -> Option<(Cursor, NodeId)> {
    let position = cursor.position(tree);
    let enclosing = match position {
        Position::Within { sequence, .. } => sequence,
        Position::Slot(placeholder) => placeholder,
    };

    let leave = |node: NodeId, side: Side| -> Option<(Cursor, NodeId)> {
        let construct = tree.parent(node)?;
        Some((Cursor::new(construct, side).canonical(tree), construct))
    };

    match direction {
        Direction::Left | Direction::Right => {
            if let Position::Within { sequence, index } = position {
                let content = tree.content(sequence);
                match direction {
                    Direction::Right if index < content.len() => return Some((
                        Cursor::at(tree, Position::Within { sequence, index: index + 1 }),
                        content[index],
                    )),
                    Direction::Left if index > 0 => return Some((
                        Cursor::at(tree, Position::Within { sequence, index: index - 1 }),
                        content[index - 1],
                    )),
                    _ => (),
                }
            }

            let side = if direction == Direction::Left { Side::Left } else { Side::Right };
            leave(enclosing, side)
        }

        Direction::Up | Direction::Down => {
            let side = if direction == Direction::Up { Side::Left } else { Side::Right };
            if selection.is_whole(enclosing) {
                leave(enclosing, side)
            } else if tree.parent(enclosing).is_none() && tree.is_empty() {
                None
            } else {
                Some((tree.cursor_at_edge(enclosing, side), enclosing))
            }
        }
    }
}
