//! Fixed-arity constructs and the per-kind tables which drive cursor movement between their slots.

use crate::nav::{Direction, Side};

/// The kind of a construct node, which determines how many slots it has and how the cursor moves
/// between them.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum ConstructKind {
    /// Slots: numerator, denominator.
    Fraction,

    /// Slots: base, exponent.
    Power,

    /// Slots: radicand.
    SquareRoot,

    /// A grid of cells stored row-major, one slot per cell.
    ///
    /// `grey` is true while the matrix carries an extra all-empty trailing row and column, which
    /// is shown while the cursor is inside the matrix so that it can be grown.
    Matrix { rows: usize, columns: usize, grey: bool },
}

/// Where the cursor should land in a slot reached by vertical movement.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum VerticalLanding {
    /// Match the horizontal position of the cursor in the slot it came from. If `centred` is true,
    /// both slots are assumed to be horizontally centred on each other.
    Matched { centred: bool },

    /// The start of the target slot.
    Start,

    /// The end of the target slot.
    End,
}

impl ConstructKind {
    pub const NUMERATOR: usize = 0;
    pub const DENOMINATOR: usize = 1;
    pub const BASE: usize = 0;
    pub const EXPONENT: usize = 1;

    /// Creates a new matrix kind without grey squares.
    pub fn matrix(rows: usize, columns: usize) -> Self {
        ConstructKind::Matrix { rows, columns, grey: false }
    }

    /// The number of slots this construct has.
    pub fn arity(&self) -> usize {
        match self {
            ConstructKind::Fraction | ConstructKind::Power => 2,
            ConstructKind::SquareRoot => 1,
            ConstructKind::Matrix { rows, columns, .. } => rows * columns,
        }
    }

    /// Returns true if the given slot is the exponent of a power.
    pub fn is_exponent_slot(&self, slot: usize) -> bool {
        matches!(self, ConstructKind::Power) && slot == Self::EXPONENT
    }

    /// The slot which the cursor enters when it crosses into this construct from the given side.
    pub fn entry_slot(&self, from: Side) -> usize {
        match (self, from) {
            (ConstructKind::Fraction, _) => Self::NUMERATOR,
            (ConstructKind::Power, Side::Left) => Self::BASE,
            (ConstructKind::Power, Side::Right) => Self::EXPONENT,
            (ConstructKind::SquareRoot, _) => 0,
            (ConstructKind::Matrix { .. }, Side::Left) => 0,
            (ConstructKind::Matrix { columns, .. }, Side::Right) => columns - 1,
        }
    }

    /// The slot beside `slot` in a horizontal direction, if the cursor can move directly there
    /// without leaving the construct.
    pub fn horizontal_neighbour(&self, slot: usize, direction: Direction) -> Option<usize> {
        match (self, direction) {
            (ConstructKind::Power, Direction::Right) if slot == Self::BASE => Some(Self::EXPONENT),
            (ConstructKind::Power, Direction::Left) if slot == Self::EXPONENT => Some(Self::BASE),

            (ConstructKind::Matrix { columns, .. }, Direction::Right)
                if slot % columns + 1 < *columns => Some(slot + 1),
            (ConstructKind::Matrix { columns, .. }, Direction::Left)
                if slot % columns > 0 => Some(slot - 1),

            _ => None,
        }
    }

    /// The slot above or below `slot`, and where the cursor should land inside it. Unlisted
    /// combinations have no vertical neighbour, and the movement propagates outwards.
    pub fn vertical_neighbour(&self, slot: usize, direction: Direction) -> Option<(usize, VerticalLanding)> {
        let matched = VerticalLanding::Matched { centred: true };

        match (self, direction) {
            (ConstructKind::Fraction, Direction::Down) if slot == Self::NUMERATOR
                => Some((Self::DENOMINATOR, matched)),
            (ConstructKind::Fraction, Direction::Up) if slot == Self::DENOMINATOR
                => Some((Self::NUMERATOR, matched)),

            (ConstructKind::Power, Direction::Up) if slot == Self::BASE
                => Some((Self::EXPONENT, VerticalLanding::Start)),
            (ConstructKind::Power, Direction::Down) if slot == Self::EXPONENT
                => Some((Self::BASE, VerticalLanding::End)),

            (ConstructKind::Matrix { columns, .. }, Direction::Up) if slot >= *columns
                => Some((slot - columns, matched)),
            (ConstructKind::Matrix { rows, columns, .. }, Direction::Down) if slot + columns < rows * columns
                => Some((slot + columns, matched)),

            _ => None,
        }
    }
}
