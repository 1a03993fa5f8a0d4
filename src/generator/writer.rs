/// Line-oriented text buffer with a fixed indentation unit.
pub(super) struct SourceWriter {
    buf: String,
    unit: String,
}

impl SourceWriter {
    pub(super) fn new(indent_width: usize) -> Self {
        Self {
            buf: String::new(),
            unit: " ".repeat(indent_width),
        }
    }

    /// Writes `text` at `level` followed by a newline. Empty text produces a bare newline.
    pub(super) fn line(&mut self, level: usize, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..level {
                self.buf.push_str(&self.unit);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub(super) fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes `text` unchanged, ending it with a newline.
    pub(super) fn verbatim(&mut self, text: &str) {
        self.buf.push_str(text);
        if !text.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    /// Writes a block authored with two-space indentation, re-indented to this writer's unit
    /// and shifted right by `level`.
    pub(super) fn block(&mut self, level: usize, block: &str) {
        for raw in block.lines() {
            let trimmed = raw.trim_start_matches(' ');
            let depth = (raw.len() - trimmed.len()) / 2;
            self.line(level + depth, trimmed);
        }
    }

    pub(super) fn finish(self) -> String {
        self.buf
    }
}
