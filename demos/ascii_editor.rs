// This example shows how to drive a `Field` from terminal input: keys become events, the field
// edits its expression tree, and the built-in `AsciiRenderer` draws the result.
//
// Keys:
//   - Printable characters insert text. `/`, `^`, `[` and `√` insert constructs.
//   - Arrows move the cursor; Alt+h/j/k/l extend the selection.
//   - Ctrl+c copies, Ctrl+v pastes, Ctrl+u clears, Backspace deletes.
//   - Enter commits the expression (or starts editing again), Esc aborts.
//   - Ctrl+d quits.

// Enforce `examples` feature is passed ------------------------------------------------------------
#[cfg(not(feature = "examples"))]
mod ascii_editor {
    pub const CHECK: usize = panic!("you must enable the `examples` feature to compile examples.");
}

#[cfg(not(feature = "examples"))]
fn main() {
    println!("{}", ascii_editor::CHECK);
}
// -------------------------------------------------------------------------------------------------

use std::error::Error;

#[cfg(feature = "examples")]
mod ascii_editor {
    use std::io::{Write, stdin, stdout};
    use std::error::Error;

    use termion::event::Key;
    use termion::input::TermRead;
    use termion::raw::IntoRawMode;

    use mathfield::clipboard::MemoryClipboard;
    use mathfield::event::Event;
    use mathfield::nav::Direction;
    use mathfield::parser::ExpressionParser;
    use mathfield::renderers::AsciiRenderer;
    use mathfield::{EditorSettings, Field, FieldDelegate, Tree};

    /// Keeps a history of committed expressions, so they can be printed under the field.
    #[derive(Default)]
    struct History {
        committed: Vec<String>,
    }

    impl FieldDelegate for History {
        fn did_finish_editing(&mut self, _text: &str, tree: &Tree) -> bool {
            // Refuse to commit nothing
            if tree.is_empty() {
                return false;
            }
            self.committed.push(tree.serialize_display(tree.root()));
            true
        }
    }

    pub fn main() -> Result<(), Box<dyn Error>> {
        // Terminal setup using termion
        let stdin = stdin();
        let mut stdout = stdout().into_raw_mode()?;

        // A field bundles everything needed to edit an expression:
        //   - A parser, which turns inserted and pasted text into nodes.
        //   - A clipboard for copy and paste.
        //   - A renderer, which sizes glyphs for layout and cursor movement, and draws them.
        //   - A delegate, which hears about commits, aborts and size changes.
        let mut field = Field::new(
            EditorSettings::default(),
            ExpressionParser,
            MemoryClipboard::default(),
            AsciiRenderer::default(),
            History::default(),
        );

        // Start editing straight away
        field.handle_event(Event::Commit);

        // This is an infinite loop which iterates when a key is pressed
        for k in stdin.keys() {
            let event = match k? {
                Key::Ctrl('d') => break,

                Key::Left => Event::Move(Direction::Left),
                Key::Right => Event::Move(Direction::Right),
                Key::Up => Event::Move(Direction::Up),
                Key::Down => Event::Move(Direction::Down),

                Key::Alt('h') => Event::ExtendSelection(Direction::Left),
                Key::Alt('l') => Event::ExtendSelection(Direction::Right),
                Key::Alt('k') => Event::ExtendSelection(Direction::Up),
                Key::Alt('j') => Event::ExtendSelection(Direction::Down),

                Key::Ctrl('c') => Event::Copy,
                Key::Ctrl('v') => Event::Paste,
                Key::Ctrl('u') => Event::Clear,
                Key::Backspace => Event::Backspace,
                Key::Char('\n') => Event::Commit,
                Key::Esc => Event::Abort,

                Key::Char(c) => Event::Text(c.to_string()),
                _ => continue,
            };
            field.handle_event(event);

            // Move the cursor back up to the top right
            write!(stdout, "{}{}", termion::cursor::Goto(1, 1), termion::clear::All)?;

            // `AsciiRenderer` does not draw straight to the screen, it draws to a buffer of lines
            // of text - so print these to the console
            field.draw();
            for line in field.renderer().lines.iter() {
                write!(stdout, "{}\r\n", line)?;
            }

            write!(stdout, "\r\n===================================\r\n")?;
            write!(stdout, "{} nodes\r\n", field.session().node_count())?;
            for expression in field.delegate().committed.iter().rev() {
                write!(stdout, "{}\r\n", expression)?;
            }

            // Ensure everything is printed
            stdout.flush()?;
        }

        Ok(())
    }
}

#[cfg(feature = "examples")]
fn main() -> Result<(), Box<dyn Error>> {
    ascii_editor::main()
}
