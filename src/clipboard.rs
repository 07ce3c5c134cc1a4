use alloc::string::{String, ToString};

/// Storage for copied text, shared between fields.
pub trait Clipboard {
    fn store(&mut self, text: &str);
    fn stored_text(&self) -> &str;
}

/// A clipboard which keeps its text in memory.
#[derive(Default, Clone, Debug)]
pub struct MemoryClipboard {
    text: String,
}

impl Clipboard for MemoryClipboard {
    fn store(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn stored_text(&self) -> &str {
        &self.text
    }
}
