use std::fmt;

use crate::options::OutputMode;

use super::variant::Truncation;
use super::word::Word;

/// Digest bytes in the order the standard prints them.
#[derive(Clone, PartialEq, Eq)]
pub struct RawDigest {
    bytes: Vec<u8>,
    words: usize,
}

impl RawDigest {
    /// Number of state words that contributed, counting a half-kept word
    /// as one.
    pub fn words(&self) -> usize {
        self.words
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_hex(&self) -> String {
        format!("{:x}", self)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for RawDigest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::LowerHex for RawDigest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for RawDigest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RawDigest(\"{:x}\")", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Digest {
    Raw(RawDigest),
    Text(String),
}

impl Digest {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Digest::Raw(raw) => Some(raw.as_ref()),
            Digest::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Digest::Raw(_) => None,
            Digest::Text(text) => Some(text.as_str()),
        }
    }

    /// Hex form regardless of the mode the digest was produced in.
    pub fn to_hex(&self) -> String {
        match self {
            Digest::Raw(raw) => raw.to_hex(),
            Digest::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Digest::Raw(raw) => write!(f, "{:x}", raw),
            Digest::Text(text) => f.write_str(text),
        }
    }
}

pub(crate) fn raw<W: Word>(state: &[W; 8], truncation: Truncation) -> RawDigest {
    let mut bytes = vec![0; truncation.words * W::BYTES];
    W::write_be_into(&state[..truncation.words], &mut bytes);
    bytes.truncate(truncation.byte_len(W::BYTES));
    RawDigest {
        bytes,
        words: truncation.words,
    }
}

pub(crate) fn text<W: Word>(state: &[W; 8], truncation: Truncation) -> String {
    let width = 2 * W::BYTES;
    let mut hex = String::with_capacity(truncation.words * width);
    for word in &state[..truncation.words] {
        hex.push_str(&format!("{:0width$x}", word, width = width));
    }
    // Drops the low half of a half-kept word
    hex.truncate(2 * truncation.byte_len(W::BYTES));
    hex
}

pub(crate) fn render<W: Word>(state: &[W; 8], truncation: Truncation, mode: OutputMode) -> Digest {
    match mode {
        OutputMode::Raw => Digest::Raw(raw(state, truncation)),
        OutputMode::Text => Digest::Text(text(state, truncation)),
    }
}
