/// Shown in place of any output when the catalog could not be loaded.
pub const CATALOG_LOAD_FAILED: &str =
    "Failed to load commands. Please check if the server is running.";

/// Appended to the output when an execution channel reports an error.
pub const CHANNEL_FAILED: &str = "\nError: WebSocket connection failed";

/// Text shown in the output panel.
///
/// Holds the output of exactly one execution: it is cleared when a new
/// execution is submitted and only ever appended to otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
}

impl OutputBuffer {
    pub fn append(&mut self, chunk: &str) {
        self.text.push_str(chunk);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Replaces the whole buffer with a single message.
    pub fn show(&mut self, message: &str) {
        self.text.clear();
        self.text.push_str(message);
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_concatenates_verbatim() {
        let mut output = OutputBuffer::default();
        output.append("h");
        output.append("i\n");
        output.append("");
        assert_eq!(output.text(), "hi\n");
    }

    #[test]
    fn test_show_replaces_contents() {
        let mut output = OutputBuffer::default();
        output.append("stale");
        output.show(CATALOG_LOAD_FAILED);
        assert_eq!(output.text(), CATALOG_LOAD_FAILED);
    }

    #[test]
    fn test_clear() {
        let mut output = OutputBuffer::default();
        output.append("something");
        output.clear();
        assert!(output.is_empty());
        assert_eq!(output.len(), 0);
    }
}
