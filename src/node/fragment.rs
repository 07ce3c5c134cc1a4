//! Detached, value-typed descriptions of subtrees.
//!
//! Parsers produce [Fragment]s rather than arena nodes, so that a parsed result can be inspected,
//! measured and compared before anything is inserted into a [Tree](super::Tree).

use alloc::{vec, vec::Vec};

use super::{ConstructKind, Token};

/// An owned description of a subtree, mirroring [NodeKind](super::NodeKind).
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Fragment {
    Sequence(Vec<Fragment>),
    Construct(ConstructKind, Vec<Fragment>),
    Atomic(Token),
    Placeholder,
}

impl Fragment {
    /// A sequence of atoms, one per character.
    pub fn atoms(text: &str) -> Fragment {
        Fragment::Sequence(text.chars().map(|c| Fragment::Atomic(Token::from_char(c))).collect())
    }

    /// A construct whose slots are all placeholders.
    pub fn empty_construct(kind: ConstructKind) -> Fragment {
        Fragment::Construct(kind, vec![Fragment::Placeholder; kind.arity()])
    }

    /// Returns this fragment rewritten into the tree's normal form:
    ///
    ///   - Sequences nested in sequences are flattened into their parent.
    ///   - Placeholders are dropped from sequences which have other content.
    ///   - Slot children are either a placeholder or a non-empty sequence.
    ///
    /// The top level is treated as a sequence position, so a top-level sequence may be empty, and a
    /// top-level sequence holding only a placeholder becomes empty.
    pub fn normalize(self) -> Fragment {
        match self {
            Fragment::Sequence(items) => {
                let items = Self::normalize_items(items);
                if items == [Fragment::Placeholder] {
                    Fragment::Sequence(vec![])
                } else {
                    Fragment::Sequence(items)
                }
            }
            Fragment::Construct(kind, slots) => Fragment::Construct(
                kind,
                slots.into_iter().map(Self::normalize_slot).collect(),
            ),
            other => other,
        }
    }

    fn normalize_items(items: Vec<Fragment>) -> Vec<Fragment> {
        let mut result = vec![];
        for item in items {
            match item.normalize() {
                Fragment::Sequence(inner) => result.extend(inner),
                other => result.push(other),
            }
        }

        if result.len() > 1 {
            result.retain(|f| *f != Fragment::Placeholder);
        }
        result
    }

    fn normalize_slot(slot: Fragment) -> Fragment {
        let items = match slot {
            Fragment::Placeholder => return Fragment::Placeholder,
            Fragment::Sequence(items) => Self::normalize_items(items),
            other => Self::normalize_items(vec![other]),
        };

        if items.is_empty() || items == [Fragment::Placeholder] {
            Fragment::Placeholder
        } else {
            Fragment::Sequence(items)
        }
    }

    /// The number of nodes which building this fragment will create.
    pub fn node_count(&self) -> usize {
        1 + match self {
            Fragment::Sequence(children) | Fragment::Construct(_, children)
                => children.iter().map(Fragment::node_count).sum(),
            Fragment::Atomic(_) | Fragment::Placeholder => 0,
        }
    }
}
