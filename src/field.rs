//! A complete input field: an [EditSession] driven by [Event]s, with the collaborators it needs to
//! parse, copy and lay out content, and a delegate which is told about the outcome.

use log::{debug, info};

use crate::{
    clipboard::Clipboard,
    error::EditError,
    event::Event,
    node::Tree,
    parser::Parse,
    render::{Area, Dimension, Layoutable, Rect, Renderer},
    session::EditSession,
    settings::EditorSettings,
};

/// Receives notifications from a [Field]. Every method has a default, so implementors only need
/// the ones they care about.
pub trait FieldDelegate {
    /// Offered every event before the field handles it. Return true to consume the event, for
    /// example to handle a shortcut of the host; the field then leaves it alone.
    fn did_receive_event(&mut self, _event: &Event) -> bool {
        false
    }

    /// Decides whether an event received while editing commits the content.
    fn should_finish_editing(&mut self, event: &Event) -> bool {
        *event == Event::Commit
    }

    /// Called on commit with the parseable text of the content. Return false to reject it, which
    /// keeps the field editing.
    fn did_finish_editing(&mut self, _text: &str, _tree: &Tree) -> bool {
        true
    }

    fn did_abort_editing(&mut self) {}

    /// Called when the height of the laid-out content changes.
    fn did_change_size(&mut self, _size: Area) {}

    /// Called after each handled event while editing, with where the cursor is drawn.
    fn scroll_into_view(&mut self, _rect: Rect, _baseline: Dimension) {}
}

impl FieldDelegate for () {}

pub struct Field<P: Parse, C: Clipboard, R: Renderer, D: FieldDelegate> {
    session: EditSession,
    parser: P,
    clipboard: C,
    renderer: R,
    delegate: D,
}

impl<P: Parse, C: Clipboard, R: Renderer, D: FieldDelegate> Field<P, C, R, D> {
    pub fn new(settings: EditorSettings, parser: P, clipboard: C, renderer: R, delegate: D) -> Self {
        Field { session: EditSession::new(settings), parser, clipboard, renderer, delegate }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    pub fn renderer(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    /// The area the field's content currently occupies.
    pub fn size(&mut self) -> Area {
        self.session.layout(&mut self.renderer).area
    }

    /// Lays out the field and draws it with the field's renderer.
    pub fn draw(&mut self) {
        self.renderer.draw_all(&self.session);
    }

    /// Handles an input event. Returns true if the event was handled; unhandled events should be
    /// passed on by the caller.
    pub fn handle_event(&mut self, event: Event) -> bool {
        let previous_size = self.size();

        let handled = match self.dispatch(event) {
            Ok(handled) => handled,
            Err(error) => {
                debug!("event not handled: {}", error);
                false
            }
        };

        if handled {
            self.reload(previous_size);
        }
        handled
    }

    fn dispatch(&mut self, event: Event) -> Result<bool, EditError> {
        if self.delegate.did_receive_event(&event) {
            debug!("{:?} consumed by the delegate", event);
            return Ok(true);
        }

        let was_editing = self.session.is_editing();
        if was_editing && self.delegate.should_finish_editing(&event) {
            return Ok(self.commit());
        }

        match event {
            Event::Commit if !was_editing => {
                self.session.set_editing(true);
                self.session.move_cursor_to_end();
                Ok(true)
            }
            // The delegate declined to finish editing
            Event::Commit => Ok(false),

            Event::Abort if was_editing => {
                self.session.clear();
                self.session.set_editing(false);
                info!("editing aborted");
                self.delegate.did_abort_editing();
                Ok(true)
            }
            Event::Copy if was_editing => {
                self.session.copy_selection(&mut self.parser, &mut self.clipboard);
                Ok(true)
            }
            Event::Clear if was_editing => {
                self.session.clear();
                Ok(true)
            }
            Event::Abort | Event::Copy | Event::Clear => Ok(false),

            // Anything else edits, so activates the field first
            event => {
                if !was_editing {
                    self.session.set_editing(true);
                }

                let result = match event {
                    Event::Move(direction) => self.session.move_cursor(direction, &mut self.renderer),
                    Event::ExtendSelection(direction) => self.session.extend_selection(direction),
                    Event::Text(text) => self.session.insert_text(&text, false, &mut self.parser),
                    Event::Paste => self.session.paste(&self.clipboard, &mut self.parser),
                    Event::Backspace => self.session.backspace(),
                    Event::Commit | Event::Abort | Event::Copy | Event::Clear => Ok(()),
                };

                if result.is_err() && !was_editing {
                    self.session.set_editing(false);
                }
                result.map(|()| true)
            }
        }
    }

    /// Offers the content to the delegate. If accepted, the field is emptied and stops editing.
    fn commit(&mut self) -> bool {
        let text = self.session.parseable_text();

        // Grey squares are not content, so take them out before the delegate sees the tree
        self.session.set_editing(false);
        if self.delegate.did_finish_editing(&text, self.session.tree()) {
            info!("committed {:?}", text);
            self.session.clear();
        } else {
            debug!("commit of {:?} rejected", text);
            self.session.set_editing(true);
        }
        true
    }

    fn reload(&mut self, previous_size: Area) {
        let layout = self.session.layout(&mut self.renderer);
        if layout.area.height != previous_size.height {
            self.delegate.did_change_size(layout.area);
        }

        if self.session.is_editing() {
            if let Some((rect, baseline)) = layout.cursor_rect(&mut self.renderer) {
                self.delegate.scroll_into_view(rect, baseline);
            }
        }
    }
}
