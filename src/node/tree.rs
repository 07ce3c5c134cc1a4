//! The arena-backed expression tree and its structural mutation primitives.

use alloc::{vec, vec::Vec};
use slotmap::{new_key_type, SlotMap};

use crate::nav::{Cursor, Position, Side};

use super::{ConstructKind, Fragment, Token};

new_key_type! {
    /// A generational handle to a node in a [Tree]. Handles to removed nodes never alias newer
    /// nodes.
    pub struct NodeId;
}

/// The variant data of a node.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum NodeKind {
    /// An ordered, variable-length list of children. Never contains another sequence.
    Sequence(Vec<NodeId>),

    /// A fixed-arity node. There is always exactly one child per slot.
    Construct(ConstructKind, Vec<NodeId>),

    /// An indivisible leaf.
    Atomic(Token),

    /// Fills a slot (or the empty root) which has no content yet.
    Placeholder,
}

impl NodeKind {
    /// The children of this node: sequence items or construct slots.
    pub fn children(&self) -> &[NodeId] {
        match self {
            NodeKind::Sequence(children) | NodeKind::Construct(_, children) => children,
            NodeKind::Atomic(_) | NodeKind::Placeholder => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            NodeKind::Sequence(children) | NodeKind::Construct(_, children) => Some(children),
            NodeKind::Atomic(_) | NodeKind::Placeholder => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    /// Back-reference used for navigation. The parent owns this node, not the other way around.
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

/// An expression tree. The root is always a sequence; when there is no content, the root holds a
/// single placeholder (the *empty skeleton*).
///
/// Slot children are either a placeholder or a non-empty sequence, and atoms and constructs always
/// live inside a sequence. [Tree::check_invariants] verifies this shape.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates the empty skeleton.
    pub fn new() -> Self {
        let mut tree = Tree { nodes: SlotMap::with_key(), root: NodeId::default() };
        let placeholder = tree.alloc(NodeKind::Placeholder);
        tree.root = tree.alloc(NodeKind::Sequence(vec![placeholder]));
        tree
    }

    /// Creates a tree whose root has the given content. The fragment is normalized first; a
    /// non-sequence fragment becomes the root's only child.
    pub fn with_content(fragment: Fragment) -> Self {
        let items = match fragment.normalize() {
            Fragment::Sequence(items) => items,
            other => vec![other],
        };

        let mut tree = Self::new();
        if items.is_empty() {
            return tree;
        }

        let old_root = tree.root;
        tree.root = tree.build(&Fragment::Sequence(items));
        tree.free(old_root);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes[id].kind.children()
    }

    /// The content children of a sequence. The placeholder of an empty skeleton is not content,
    /// so this is empty for a skeleton.
    pub fn content(&self, id: NodeId) -> &[NodeId] {
        if self.is_skeleton(id) {
            &[]
        } else {
            self.children(id)
        }
    }

    pub fn is_sequence(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Sequence(_))
    }

    pub fn is_placeholder(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Placeholder)
    }

    /// Returns true if this is a sequence holding only a placeholder.
    pub fn is_skeleton(&self, id: NodeId) -> bool {
        match self.kind(id) {
            NodeKind::Sequence(children) => {
                children.len() == 1 && self.is_placeholder(children[0])
            }
            _ => false,
        }
    }

    /// Returns true if the whole tree has no content.
    pub fn is_empty(&self) -> bool {
        self.is_skeleton(self.root)
    }

    pub fn construct_kind(&self, id: NodeId) -> Option<ConstructKind> {
        match self.kind(id) {
            NodeKind::Construct(kind, _) => Some(*kind),
            _ => None,
        }
    }

    /// The index of this node among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    /// Iterates over the strict ancestors of a node, innermost first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors {
        Ancestors { tree: self, next: self.parent(id) }
    }

    /// The number of nodes in the subtree rooted at `id`, including `id` itself.
    pub fn descendant_count(&self, id: NodeId) -> usize {
        1 + self.children(id).iter().map(|c| self.descendant_count(*c)).sum::<usize>()
    }

    /// The number of nodes in the whole tree.
    pub fn node_count(&self) -> usize {
        self.descendant_count(self.root)
    }

    /// Returns true if `candidate` is an ancestor of `id`. If `strict` is false, a node counts as
    /// its own ancestor.
    pub fn has_ancestor(&self, id: NodeId, candidate: NodeId, strict: bool) -> bool {
        (!strict && id == candidate) || self.ancestors(id).any(|a| a == candidate)
    }

    /// The child indices leading from the root to this node.
    fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = vec![];
        let mut current = id;
        while let Some(index) = self.index_in_parent(current) {
            path.push(index);
            current = self.parent(current).unwrap_or(current);
        }
        path.reverse();
        path
    }

    /// Document-order comparison: returns true if `a` comes before `b` in a pre-order walk, so an
    /// ancestor comes before all of its descendants.
    pub fn is_before(&self, a: NodeId, b: NodeId, strict: bool) -> bool {
        let (a, b) = (self.path(a), self.path(b));
        if strict { a < b } else { a <= b }
    }

    /// The first placeholder in a pre-order walk of this subtree.
    pub fn first_placeholder(&self, id: NodeId) -> Option<NodeId> {
        if self.is_placeholder(id) {
            return Some(id);
        }
        self.children(id).iter().find_map(|c| self.first_placeholder(*c))
    }

    /// Collects every node of the given subtree for which `predicate` holds, in pre-order.
    pub fn find_all(&self, id: NodeId, predicate: impl Fn(&NodeKind) -> bool + Copy) -> Vec<NodeId> {
        let mut found = vec![];
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if predicate(self.kind(current)) {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev());
        }
        found
    }

    /// Materialises a fragment as a detached subtree and returns its root. The fragment should
    /// already be [normalized](Fragment::normalize).
    pub fn build(&mut self, fragment: &Fragment) -> NodeId {
        let kind = match fragment {
            Fragment::Sequence(items)
                => NodeKind::Sequence(items.iter().map(|f| self.build(f)).collect()),
            Fragment::Construct(kind, slots)
                => NodeKind::Construct(*kind, slots.iter().map(|f| self.build(f)).collect()),
            Fragment::Atomic(token) => NodeKind::Atomic(*token),
            Fragment::Placeholder => NodeKind::Placeholder,
        };
        self.alloc(kind)
    }

    /// Converts a subtree back into a fragment. Useful for comparing structure.
    pub fn to_fragment(&self, id: NodeId) -> Fragment {
        let children = || self.children(id).iter().map(|c| self.to_fragment(*c)).collect();
        match self.kind(id) {
            NodeKind::Sequence(_) => Fragment::Sequence(children()),
            NodeKind::Construct(kind, _) => Fragment::Construct(*kind, children()),
            NodeKind::Atomic(token) => Fragment::Atomic(*token),
            NodeKind::Placeholder => Fragment::Placeholder,
        }
    }

    /// Inserts a new detached node, adopting its children.
    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.insert(Node { parent: None, kind });
        for i in 0..self.children(id).len() {
            let child = self.children(id)[i];
            self.nodes[child].parent = Some(id);
        }
        id
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.nodes[id].parent = Some(parent);
    }

    pub(crate) fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id].kind = kind;
    }

    /// Removes a node and all of its descendants from the arena.
    pub(crate) fn free(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.kind.children());
            }
        }
    }

    fn sequence_children_mut(&mut self, id: NodeId) -> &mut Vec<NodeId> {
        match &mut self.nodes[id].kind {
            NodeKind::Sequence(children) => children,
            other => panic!("expected a sequence, found {:?}", other),
        }
    }

    /// Inserts `node` as a child of the sequence `parent`, shifting later siblings right.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, node: NodeId) {
        self.sequence_children_mut(parent).insert(index, node);
        self.nodes[node].parent = Some(parent);
    }

    /// Removes and frees the child at `index` of the sequence `parent`. If the cursor pointed into
    /// the removed subtree, it is moved to where the child used to be.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize, cursor: &mut Cursor) {
        let removed = self.sequence_children_mut(parent).remove(index);
        let cursor_inside = self.has_ancestor(cursor.node, removed, false);
        self.free(removed);

        if cursor_inside {
            *cursor = Cursor::at(self, Position::Within { sequence: parent, index });
        }
    }

    /// Puts `new` where `old` is in old's parent, then frees `old`.
    pub(crate) fn replace(&mut self, old: NodeId, new: NodeId) {
        let parent = self.parent(old).expect("cannot replace the root");
        let index = self.index_in_parent(old).expect("node missing from its parent");
        if let Some(children) = self.nodes[parent].kind.children_mut() {
            children[index] = new;
        }
        self.nodes[new].parent = Some(parent);
        self.nodes[old].parent = None;
        self.free(old);
    }

    /// Clears a construct slot by substituting a placeholder for its child. A cursor inside the
    /// removed subtree is moved to the left of the new placeholder.
    pub fn replace_slot_with_placeholder(&mut self, slot_child: NodeId, cursor: &mut Cursor) -> NodeId {
        debug_assert!(
            self.parent(slot_child).map_or(false, |p| self.construct_kind(p).is_some()),
            "only construct slots can be replaced with a placeholder",
        );

        let cursor_inside = self.has_ancestor(cursor.node, slot_child, false);
        let placeholder = self.alloc(NodeKind::Placeholder);
        self.replace(slot_child, placeholder);

        if cursor_inside {
            *cursor = Cursor::new(placeholder, Side::Left);
        }
        placeholder
    }

    /// Splices every child of `source` into `target` at `index`, preserving order, and discards
    /// `source`. A cursor pointing at `source` is moved to an equivalent position first.
    pub fn merge_sequence_into(&mut self, target: NodeId, index: usize, source: NodeId, cursor: &mut Cursor) {
        debug_assert!(self.is_sequence(target) && self.is_sequence(source));

        if cursor.node == source {
            *cursor = cursor.equivalent(self)
                .unwrap_or_else(|| Cursor::at(self, Position::Within { sequence: target, index }));
        }

        if let Some(parent) = self.parent(source) {
            if let Some(children) = self.nodes[parent].kind.children_mut() {
                children.retain(|c| *c != source);
            }
        }

        let children = core::mem::take(self.sequence_children_mut(source));
        for (offset, child) in children.into_iter().enumerate() {
            self.insert_child(target, index + offset, child);
        }
        self.nodes.remove(source);
    }

    /// Replaces the whole tree with the empty skeleton.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Panics if the tree is not in its normal form. Every public editing operation leaves the
    /// tree in this form, so a failure here is a bug.
    pub fn check_invariants(&self) {
        assert!(self.parent(self.root).is_none(), "root has a parent");
        assert!(self.is_sequence(self.root), "root is not a sequence");

        let mut reachable = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            reachable += 1;
            for child in self.children(id) {
                assert_eq!(self.parent(*child), Some(id), "broken parent back-reference");
                stack.push(*child);
            }

            match self.kind(id) {
                NodeKind::Sequence(children) => {
                    for child in children {
                        assert!(!self.is_sequence(*child), "sequence nested directly in a sequence");
                        if self.is_placeholder(*child) {
                            assert!(
                                id == self.root && children.len() == 1,
                                "placeholder in a sequence which is not the empty root",
                            );
                        }
                    }
                }
                NodeKind::Construct(kind, slots) => {
                    assert_eq!(kind.arity(), slots.len(), "construct slot count differs from arity");
                    for slot in slots {
                        match self.kind(*slot) {
                            NodeKind::Placeholder => (),
                            NodeKind::Sequence(items) => assert!(!items.is_empty(), "empty sequence in a slot"),
                            other => panic!("slot holds {:?} directly", other),
                        }
                    }
                }
                NodeKind::Atomic(_) | NodeKind::Placeholder => (),
            }
        }

        assert_eq!(reachable, self.nodes.len(), "arena holds unreachable nodes");
    }
}

/// Iterator over the strict ancestors of a node. See [Tree::ancestors].
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
