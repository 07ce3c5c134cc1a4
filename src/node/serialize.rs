//! Converts subtrees to text.
//!
//! There are two text forms:
//!
//!   - The *display* form is what a user would type to get the same expression, and is used as a
//!     fallback when copying.
//!   - The *parseable* form wraps every construct slot in system parentheses and writes empty slots
//!     as [EMPTY_MARKER], so that [ExpressionParser](crate::parser::ExpressionParser) can rebuild
//!     exactly the same structure from it.

use alloc::string::String;

use super::{ConstructKind, NodeId, NodeKind, Tree, EMPTY_MARKER, SYSTEM_LEFT_PARENTHESIS, SYSTEM_RIGHT_PARENTHESIS};

/// The slots of a matrix which are actually shown as content, excluding grey squares.
fn visible_cells(kind: ConstructKind) -> (usize, usize, usize) {
    match kind {
        ConstructKind::Matrix { rows, columns, grey: true } => (rows - 1, columns - 1, columns),
        ConstructKind::Matrix { rows, columns, grey: false } => (rows, columns, columns),
        _ => (0, 0, 0),
    }
}

impl Tree {
    /// The display form of a subtree.
    pub fn serialize_display(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_display(id, &mut out);
        out
    }

    fn write_display(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Atomic(token) => out.push(token.to_char()),
            NodeKind::Placeholder => (),
            NodeKind::Sequence(_) => {
                for child in self.content(id) {
                    self.write_display(*child, out);
                }
            }
            NodeKind::Construct(kind, slots) => match kind {
                ConstructKind::Fraction => {
                    self.write_display_operand(slots[0], out);
                    out.push('/');
                    self.write_display_operand(slots[1], out);
                }
                ConstructKind::Power => {
                    self.write_display_operand(slots[0], out);
                    out.push('^');
                    self.write_display_operand(slots[1], out);
                }
                ConstructKind::SquareRoot => {
                    out.push_str("√(");
                    self.write_display(slots[0], out);
                    out.push(')');
                }
                ConstructKind::Matrix { .. } => {
                    let (rows, columns, stride) = visible_cells(*kind);
                    out.push('[');
                    for row in 0..rows {
                        out.push('[');
                        for column in 0..columns {
                            if column > 0 {
                                out.push(',');
                            }
                            self.write_display(slots[row * stride + column], out);
                        }
                        out.push(']');
                    }
                    out.push(']');
                }
            },
        }
    }

    /// Operands of infix constructs need parentheses if they are more than one node long.
    fn write_display_operand(&self, slot: NodeId, out: &mut String) {
        if self.content(slot).len() > 1 {
            out.push('(');
            self.write_display(slot, out);
            out.push(')');
        } else {
            self.write_display(slot, out);
        }
    }

    /// The parseable form of a subtree.
    pub fn serialize_parseable(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_parseable(id, &mut out);
        out
    }

    /// The parseable form of the children `first..=last` of a sequence.
    pub fn serialize_parseable_range(&self, sequence: NodeId, first: usize, last: usize) -> String {
        let mut out = String::new();
        for child in &self.content(sequence)[first..=last] {
            self.write_parseable(*child, &mut out);
        }
        out
    }

    fn write_parseable(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Atomic(token) => out.push(token.to_char()),
            NodeKind::Placeholder => out.push(EMPTY_MARKER),
            NodeKind::Sequence(_) => {
                for child in self.content(id) {
                    self.write_parseable(*child, out);
                }
            }
            NodeKind::Construct(kind, slots) => match kind {
                ConstructKind::Fraction => {
                    self.write_parseable_group(slots[0], out);
                    out.push('/');
                    self.write_parseable_group(slots[1], out);
                }
                ConstructKind::Power => {
                    self.write_parseable_group(slots[0], out);
                    out.push('^');
                    self.write_parseable_group(slots[1], out);
                }
                ConstructKind::SquareRoot => {
                    out.push('√');
                    self.write_parseable_group(slots[0], out);
                }
                ConstructKind::Matrix { .. } => {
                    let (rows, columns, stride) = visible_cells(*kind);
                    out.push('[');
                    for row in 0..rows {
                        out.push('[');
                        for column in 0..columns {
                            if column > 0 {
                                out.push(',');
                            }
                            self.write_parseable_group(slots[row * stride + column], out);
                        }
                        out.push(']');
                    }
                    out.push(']');
                }
            },
        }
    }

    fn write_parseable_group(&self, slot: NodeId, out: &mut String) {
        out.push(SYSTEM_LEFT_PARENTHESIS);
        self.write_parseable(slot, out);
        out.push(SYSTEM_RIGHT_PARENTHESIS);
    }
}
