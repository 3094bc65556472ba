/// Accumulated program output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    /// Appends one `output` chunk and returns what was actually added.
    ///
    /// A chunk starting with `\r` becomes a single newline.
    pub fn append(&mut self, content: &str) -> &str {
        let chunk = if content.starts_with('\r') {
            "\n"
        } else {
            content
        };
        let start = self.text.len();
        self.text.push_str(chunk);
        &self.text[start..]
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
