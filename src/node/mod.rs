//! The expression tree representing a mathematical expression being edited.
//!
//! A [Tree] is an arena of nodes, addressed by generational [NodeId]s. There are four kinds of
//! node:
//!
//!   - Sequences, ordered lists of content. The root is always a sequence.
//!   - Constructs, such as fractions and powers, with a fixed number of slots.
//!   - Atomic tokens, such as digits and operators.
//!   - Placeholders, which mark an empty slot.
//!
//! Detached subtrees are described by value with [Fragment]s, which is what parsers produce.
//!
//! Trees support [serialization](serialize) to text and [layout](crate::render).

mod tree;
mod fragment;
mod construct;
mod token;
mod layout;
mod matrix;
pub mod serialize;

pub use tree::{Ancestors, Node, NodeId, NodeKind, Tree};
pub use fragment::Fragment;
pub use construct::{ConstructKind, VerticalLanding};
pub use token::{Token, is_control_marker, EMPTY_MARKER, SYSTEM_LEFT_PARENTHESIS, SYSTEM_RIGHT_PARENTHESIS};
