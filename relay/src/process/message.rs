//! Outbound message assembly.

/// Currency glyph appended to every amount.
pub const RUBLE: &str = "₽";

/// A message built line by line in display order.
///
/// Optional sections are simply not pushed, so they never leave blank lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMessage {
    lines: Vec<String>,
}

impl RenderedMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join the lines into the text handed to the notifier.
    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}
