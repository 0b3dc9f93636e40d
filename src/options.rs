use crate::digest::stream::DEFAULT_READ_AHEAD;

/// Shape of the returned digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Canonical big-endian digest bytes.
    Raw,
    /// Lowercase hexadecimal.
    #[default]
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestOptions {
    pub output: OutputMode,
    /// Upper bound on the buffer used to stream file sources, in bytes.
    pub read_ahead: usize,
}

impl Default for DigestOptions {
    fn default() -> Self {
        DigestOptions {
            output: OutputMode::default(),
            read_ahead: DEFAULT_READ_AHEAD,
        }
    }
}

impl DigestOptions {
    pub fn raw(self) -> Self {
        self.with_output(OutputMode::Raw)
    }

    pub fn text(self) -> Self {
        self.with_output(OutputMode::Text)
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn with_read_ahead(mut self, read_ahead: usize) -> Self {
        self.read_ahead = read_ahead;
        self
    }
}
