/// Limits applied to an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorSettings {
    /// The largest number of nodes the tree may hold, counting sequences and placeholders.
    pub max_nodes: usize,

    /// Text insertion is refused outright once the tree is within this many nodes of
    /// `max_nodes`, before any parsing happens.
    pub insertion_margin: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            max_nodes: 220,
            insertion_margin: 6,
        }
    }
}
