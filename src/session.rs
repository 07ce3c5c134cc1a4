//! An editing session over one expression tree: the tree, a cursor, a selection, and the edit
//! operations which keep the three consistent.

use alloc::{string::String, vec, vec::Vec};
use log::{debug, trace};

use crate::{
    clipboard::Clipboard,
    error::EditError,
    event::skeleton_for,
    nav::{Cursor, Direction, Position, Side},
    node::{ConstructKind, Fragment, NodeId, NodeKind, Token, Tree, is_control_marker, EMPTY_MARKER},
    parser::Parse,
    render::{Dimension, LayoutBlock, LayoutMarks, Layoutable, Rect, Renderer},
    selection::{select_at_direction, Selection},
    settings::EditorSettings,
};

#[derive(PartialEq, Eq, Debug, Copy, Clone, Default)]
pub enum EditState {
    #[default]
    NotEditing,
    Editing,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    tree: Tree,
    cursor: Cursor,
    selection: Selection,
    state: EditState,
    settings: EditorSettings,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Layoutable for EditSession {
    fn layout(&self, renderer: &mut impl Renderer) -> LayoutBlock {
        let marks = LayoutMarks {
            cursor: self.is_editing().then(|| self.cursor.position(&self.tree)),
            selection: self.selection,
        };
        self.tree.layout_node(self.tree.root(), renderer, &marks)
    }
}

impl EditSession {
    /// Creates an inactive session over an empty tree.
    pub fn new(settings: EditorSettings) -> Self {
        let tree = Tree::new();
        let cursor = Cursor::new(tree.root(), Side::Left);
        EditSession { tree, cursor, selection: Selection::Empty, state: EditState::NotEditing, settings }
    }

    /// Creates an active session over a tree with the given content, with the cursor at the end.
    pub fn with_content(settings: EditorSettings, fragment: Fragment) -> Result<Self, EditError> {
        let mut session = Self::new(settings);
        session.state = EditState::Editing;
        session.insert_fragment(fragment, true)?;
        Ok(session)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn is_editing(&self) -> bool {
        self.state == EditState::Editing
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.state = if editing { EditState::Editing } else { EditState::NotEditing };
        self.finish();
    }

    /// The total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    pub fn display_text(&self) -> String {
        self.tree.serialize_display(self.tree.root())
    }

    pub fn parseable_text(&self) -> String {
        self.tree.serialize_parseable(self.tree.root())
    }

    /// Places the cursor directly, for example after a pointer event. The cursor must name a node
    /// in this session's tree.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor.canonical(&self.tree);
        self.finish();
    }

    /// Places the cursor at the right of all content.
    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.tree.cursor_at_edge(self.tree.root(), Side::Right);
        self.finish();
    }

    fn ensure_editing(&self) -> Result<(), EditError> {
        if self.is_editing() { Ok(()) } else { Err(EditError::NotEditing) }
    }

    /// Moves the cursor one step. If there is a selection, the selection is cleared instead and
    /// the cursor stays where it is.
    pub fn move_cursor(&mut self, direction: Direction, renderer: &mut impl Renderer) -> Result<(), EditError> {
        self.ensure_editing()?;

        if self.reset_selection() {
            return Ok(());
        }

        self.cursor = self.tree.cursor_at_direction(self.cursor, direction, renderer)
            .ok_or(EditError::NoMovement)?;
        self.finish();
        Ok(())
    }

    /// Moves the cursor one step while growing or shrinking the selection over what it passes.
    pub fn extend_selection(&mut self, direction: Direction) -> Result<(), EditError> {
        self.ensure_editing()?;

        let (cursor, candidate) = select_at_direction(&self.tree, self.cursor, self.selection, direction)
            .ok_or(EditError::NoMovement)?;
        self.selection.add(&self.tree, candidate);
        self.cursor = cursor;
        trace!("selection is now {:?}", self.selection);
        self.finish();
        Ok(())
    }

    /// Clears the selection without changing the tree. Returns true if anything was selected.
    pub fn reset_selection(&mut self) -> bool {
        let had_selection = self.selection.reset();
        if had_selection {
            self.finish();
        }
        had_selection
    }

    /// The text which copying the selection would store, if any.
    pub fn selection_text(&self, parser: &mut impl Parse) -> Option<String> {
        let (start, end) = self.selection.bounds()?;

        if start != end {
            let parent = self.tree.parent(start)?;
            let first = self.tree.index_in_parent(start)?;
            let last = self.tree.index_in_parent(end)?;
            return Some(self.tree.serialize_parseable_range(parent, first, last));
        }

        // Prefer the parseable form, so that pasting rebuilds the same structure
        let parseable = self.tree.serialize_parseable(start);
        if !parseable.is_empty() && parser.parse(&parseable).is_ok() {
            return Some(parseable);
        }

        let display = self.tree.serialize_display(start);
        if display.is_empty() {
            return None;
        }

        let mut text = String::new();
        if self.is_exponent_slot(start) {
            // An exponent on its own would read as an ordinary expression
            text.push(EMPTY_MARKER);
        }
        text.push_str(&display);
        Some(text)
    }

    fn is_exponent_slot(&self, id: NodeId) -> bool {
        let Some(parent) = self.tree.parent(id) else { return false };
        match (self.tree.construct_kind(parent), self.tree.index_in_parent(id)) {
            (Some(kind), Some(slot)) => kind.is_exponent_slot(slot),
            _ => false,
        }
    }

    /// Stores the selected content in the clipboard. Does nothing if there is no selection.
    pub fn copy_selection(&self, parser: &mut impl Parse, clipboard: &mut impl Clipboard) {
        if let Some(text) = self.selection_text(parser) {
            debug!("copying {:?}", text);
            clipboard.store(&text);
        }
    }

    /// Deletes the selected content and clears the selection. The cursor ends up where the content
    /// was.
    pub fn delete_selection(&mut self) {
        let Some((start, end)) = self.selection.bounds() else { return };
        self.selection.reset();

        match self.tree.parent(start) {
            None => self.reset_tree(),

            Some(parent) if self.tree.is_sequence(parent) => {
                let first = self.tree.index_in_parent(start).unwrap_or(0);
                let last = self.tree.index_in_parent(end).unwrap_or(first);
                for index in (first..=last).rev() {
                    self.tree.remove_child_at(parent, index, &mut self.cursor);
                }
                self.cursor = Cursor::at(&self.tree, Position::Within { sequence: parent, index: first });
                self.settle(parent);
            }

            Some(_) => {
                self.tree.replace_slot_with_placeholder(start, &mut self.cursor);
            }
        }

        self.finish();
    }

    /// Inserts text at the cursor, replacing any selection.
    ///
    /// Structural tokens (see [skeleton_for]) insert a construct skeleton. Other text is parsed,
    /// and inserted literally if it does not parse. Unless `force_cursor_right` is set, the cursor
    /// lands on the first empty slot of the inserted content, or between its first pair of empty
    /// parentheses, or failing that after it.
    pub fn insert_text(&mut self, text: &str, force_cursor_right: bool, parser: &mut impl Parse) -> Result<(), EditError> {
        self.ensure_editing()?;

        if !self.selection.is_empty() {
            self.delete_selection();
        }
        if text.is_empty() {
            return Ok(());
        }

        let current = self.node_count();
        let maximum = self.settings.max_nodes;
        if current >= maximum.saturating_sub(self.settings.insertion_margin) {
            debug!("refusing to insert {:?}, tree has {} nodes", text, current);
            return Err(EditError::CapacityExceeded {
                current,
                adding: self.settings.insertion_margin,
                maximum,
            });
        }

        if let Some(skeleton) = skeleton_for(text) {
            return self.insert_fragment(skeleton, false);
        }

        let fragment = match parser.parse(text) {
            Ok(fragment) => fragment,
            Err(error) => {
                debug!("{:?} does not parse ({}), inserting it literally", text, error);
                Fragment::Sequence(
                    text.chars()
                        .filter(|c| !is_control_marker(*c))
                        .map(|c| Fragment::Atomic(Token::from_char(c)))
                        .collect()
                )
            }
        };

        self.insert_fragment(fragment, force_cursor_right)
    }

    /// Inserts a fragment at the cursor, replacing any selection. See [EditSession::insert_text]
    /// for where the cursor lands.
    pub fn insert_fragment(&mut self, fragment: Fragment, force_cursor_right: bool) -> Result<(), EditError> {
        self.ensure_editing()?;

        if !self.selection.is_empty() {
            self.delete_selection();
        }

        let fragment = match fragment {
            Fragment::Sequence(_) => fragment,
            other => Fragment::Sequence(vec![other]),
        }.normalize();
        let current = self.node_count();
        let adding = fragment.node_count();
        let maximum = self.settings.max_nodes;
        if current + adding >= maximum {
            debug!("refusing to insert {} nodes into a tree of {}", adding, current);
            return Err(EditError::CapacityExceeded { current, adding, maximum });
        }

        let inserted = self.tree.build(&fragment);

        // Work out the landing before the fragment's own sequence is merged away
        let landing = if force_cursor_right { None } else { self.landing_in(inserted) };

        let (sequence, index) = self.prepare_insertion_point();
        let end = index + self.tree.children(inserted).len();
        self.tree.merge_sequence_into(sequence, index, inserted, &mut self.cursor);

        self.cursor = landing
            .unwrap_or_else(|| Cursor::at(&self.tree, Position::Within { sequence, index: end }));
        self.settle(sequence);
        self.finish();
        Ok(())
    }

    /// Where the cursor should land in newly-built content.
    fn landing_in(&self, inserted: NodeId) -> Option<Cursor> {
        if let Some(placeholder) = self.tree.first_placeholder(inserted) {
            return Some(Cursor::new(placeholder, Side::Left));
        }

        self.tree.children(inserted)
            .windows(2)
            .find(|pair| {
                matches!(self.tree.kind(pair[0]), NodeKind::Atomic(Token::LeftParenthesis))
                    && matches!(self.tree.kind(pair[1]), NodeKind::Atomic(Token::RightParenthesis))
            })
            .map(|pair| Cursor::new(pair[0], Side::Right))
    }

    /// Turns the cursor position into a sequence and index which content can be inserted at. An
    /// empty slot gets a fresh sequence, and the empty root loses its placeholder.
    fn prepare_insertion_point(&mut self) -> (NodeId, usize) {
        match self.cursor.position(&self.tree) {
            Position::Within { sequence, index } => {
                if self.tree.is_skeleton(sequence) {
                    self.tree.remove_child_at(sequence, 0, &mut self.cursor);
                    (sequence, 0)
                } else {
                    (sequence, index)
                }
            }
            Position::Slot(placeholder) => {
                let sequence = self.tree.alloc(NodeKind::Sequence(Vec::new()));
                self.tree.replace(placeholder, sequence);
                self.cursor = Cursor::new(sequence, Side::Left);
                (sequence, 0)
            }
        }
    }

    /// Restores the normal form of a sequence which may have become empty: an empty slot child
    /// becomes a placeholder, and an empty root becomes the empty skeleton.
    fn settle(&mut self, sequence: NodeId) {
        if !self.tree.children(sequence).is_empty() {
            return;
        }

        if self.tree.parent(sequence).is_some() {
            self.tree.replace_slot_with_placeholder(sequence, &mut self.cursor);
        } else {
            let placeholder = self.tree.alloc(NodeKind::Placeholder);
            self.tree.insert_child(sequence, 0, placeholder);
            self.cursor = Cursor::new(sequence, Side::Left);
        }
    }

    /// Deletes backwards from the cursor.
    ///
    ///   - With a selection, deletes the selection.
    ///   - After a node in a sequence, deletes that node (a whole construct, if it is one).
    ///   - At the start of a non-empty slot, clears the slot.
    ///   - In an empty slot, deletes the enclosing construct.
    ///   - At the start of the root, does nothing.
    pub fn backspace(&mut self) -> Result<(), EditError> {
        self.ensure_editing()?;

        if !self.selection.is_empty() {
            self.delete_selection();
            return Ok(());
        }

        match self.cursor.position(&self.tree) {
            Position::Within { sequence, index } if index > 0 => {
                self.tree.remove_child_at(sequence, index - 1, &mut self.cursor);
                self.cursor = Cursor::at(&self.tree, Position::Within { sequence, index: index - 1 });
                self.settle(sequence);
            }

            Position::Within { sequence, .. } => {
                if self.tree.parent(sequence).is_some() {
                    self.tree.replace_slot_with_placeholder(sequence, &mut self.cursor);
                }
            }

            Position::Slot(placeholder) => {
                let Some(construct) = self.tree.parent(placeholder) else { return Ok(()) };
                let Some(sequence) = self.tree.parent(construct) else { return Ok(()) };
                let index = self.tree.index_in_parent(construct).unwrap_or(0);
                self.tree.remove_child_at(sequence, index, &mut self.cursor);
                self.settle(sequence);
            }
        }

        self.finish();
        Ok(())
    }

    /// Inserts the clipboard's text at the cursor, leaving the cursor after it.
    pub fn paste(&mut self, clipboard: &impl Clipboard, parser: &mut impl Parse) -> Result<(), EditError> {
        let text = String::from(clipboard.stored_text());
        self.insert_text(&text, true, parser)
    }

    /// Empties the tree, keeping the editing state.
    pub fn clear(&mut self) {
        self.reset_tree();
        self.finish();
    }

    fn reset_tree(&mut self) {
        self.tree.clear();
        self.cursor = Cursor::new(self.tree.root(), Side::Left);
        self.selection = Selection::Empty;
    }

    /// The rectangle the cursor is drawn in, and the cursor's baseline, for scrolling it into
    /// view.
    pub fn scroll_target(&self, renderer: &mut impl Renderer) -> Option<(Rect, Dimension)> {
        self.layout(renderer).cursor_rect(renderer)
    }

    /// Brings grey squares up to date and checks consistency. Runs after every mutation.
    fn finish(&mut self) {
        self.refresh_matrices();

        #[cfg(debug_assertions)]
        self.check_consistency();
    }

    /// Adds grey squares to matrices the cursor is inside, and removes them from all others.
    fn refresh_matrices(&mut self) {
        let anchor = match self.cursor.position(&self.tree) {
            Position::Within { sequence, .. } => sequence,
            Position::Slot(placeholder) => placeholder,
        };
        let inside = if self.is_editing() {
            self.tree.ancestors(anchor).collect::<Vec<_>>()
        } else {
            Vec::new()
        };

        let matrices = self.tree.find_all(self.tree.root(), |k| matches!(
            k, NodeKind::Construct(ConstructKind::Matrix { .. }, _)
        ));
        let (entered, left): (Vec<_>, Vec<_>) = matrices.into_iter().partition(|m| inside.contains(m));

        // Removing first frees up room for the new squares
        for matrix in left {
            if self.tree.contains(matrix) && self.tree.remove_grey_squares(matrix, &mut self.cursor) {
                trace!("removed grey squares from {:?}", matrix);
            }
        }
        for matrix in entered {
            let budget = self.settings.max_nodes.saturating_sub(self.tree.node_count());
            if self.tree.contains(matrix) && self.tree.add_grey_squares(matrix, budget) {
                trace!("added grey squares to {:?}", matrix);
            }
        }
    }

    #[cfg(debug_assertions)]
    fn check_consistency(&self) {
        self.tree.check_invariants();
        assert!(self.tree.contains(self.cursor.node), "cursor names a removed node");
        assert!(self.node_count() <= self.settings.max_nodes, "tree exceeds its node limit");

        if let Some((start, end)) = self.selection.bounds() {
            assert!(self.tree.contains(start) && self.tree.contains(end), "selection names a removed node");
            assert_eq!(self.tree.parent(start), self.tree.parent(end), "selection spans different parents");
            assert!(self.tree.is_before(start, end, false), "selection ends before it starts");
        }
    }
}
