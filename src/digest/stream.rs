use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::DigestError;

/// Read-ahead window used for file sources unless configured otherwise.
pub const DEFAULT_READ_AHEAD: usize = 5 * 1024 * 1024;

// Large enough to hold one block of either family.
const MIN_READ_AHEAD: usize = 128;

/// Where the bytes being hashed come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    Memory(&'a [u8]),
    File(&'a Path),
}

impl<'a> Source<'a> {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Source::Memory(_) => "memory",
            Source::File(_) => "file",
        }
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Memory(bytes)
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Source::File(path)
    }
}

/// Byte-level progress of one computation through its source.
pub(crate) struct StreamState<'a> {
    // Length of the real source, fixed before streaming starts.
    source_len: u64,
    consumed: u64,
    // Source length plus any injected block; this is what the length field encodes.
    logical_len: u64,
    window: Window<'a>,
}

enum Window<'a> {
    Memory { data: &'a [u8], offset: usize },
    File(FileWindow),
}

struct FileWindow {
    file: File,
    path: PathBuf,
    buf: Vec<u8>,
    // Valid bytes in `buf`.
    len: usize,
    // Next unread byte in `buf`.
    offset: usize,
}

impl<'a> StreamState<'a> {
    pub fn open(source: &Source<'a>, read_ahead: usize) -> Result<Self, DigestError> {
        match *source {
            Source::Memory(data) => Ok(StreamState::memory(data)),
            Source::File(path) => StreamState::file(path, read_ahead),
        }
    }

    pub fn memory(data: &'a [u8]) -> Self {
        StreamState {
            source_len: data.len() as u64,
            consumed: 0,
            logical_len: data.len() as u64,
            window: Window::Memory { data, offset: 0 },
        }
    }

    pub fn file(path: &Path, read_ahead: usize) -> Result<Self, DigestError> {
        let open_error = |source: io::Error| DigestError::SourceOpen {
            path: path.to_owned(),
            source,
        };
        let file = File::open(path).map_err(open_error)?;
        let source_len = file.metadata().map_err(open_error)?.len();

        // Small files don't need the whole window.
        let wanted = usize::try_from(source_len).unwrap_or(usize::MAX);
        let capacity = read_ahead.min(wanted).max(MIN_READ_AHEAD);

        Ok(StreamState {
            source_len,
            consumed: 0,
            logical_len: source_len,
            window: Window::File(FileWindow {
                file,
                path: path.to_owned(),
                buf: vec![0; capacity],
                len: 0,
                offset: 0,
            }),
        })
    }

    /// Bytes of the real source not yet handed out.
    pub fn remaining(&self) -> u64 {
        self.source_len - self.consumed
    }

    /// Claims a longer source than the file holds, as if it shrank after
    /// being measured.
    #[cfg(test)]
    pub fn overstate_len(mut self, source_len: u64) -> Self {
        self.source_len = source_len;
        self.logical_len = source_len;
        self
    }

    pub fn logical_len(&self) -> u64 {
        self.logical_len
    }

    /// Accounts for `len` bytes that precede the source in the hashed message.
    pub fn extend_logical(&mut self, len: usize) {
        self.logical_len += len as u64;
    }

    /// Hands out the next `len` bytes of the source. `len` must not exceed
    /// `remaining()`.
    pub fn take(&mut self, len: usize) -> Result<&[u8], DigestError> {
        debug_assert!(len as u64 <= self.remaining());
        let bytes = match &mut self.window {
            Window::Memory { data, offset } => {
                let start = *offset;
                *offset += len;
                &data[start..start + len]
            }
            Window::File(window) => window.take(len)?,
        };
        self.consumed += len as u64;
        Ok(bytes)
    }
}

impl FileWindow {
    fn take(&mut self, len: usize) -> Result<&[u8], DigestError> {
        if self.len - self.offset < len {
            self.refill(len)?;
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.buf[start..start + len])
    }

    // Moves the unread tail to the front and reads until at least `len`
    // bytes are buffered.
    fn refill(&mut self, len: usize) -> Result<(), DigestError> {
        self.buf.copy_within(self.offset..self.len, 0);
        self.len -= self.offset;
        self.offset = 0;

        while self.len < len {
            match self.file.read(&mut self.buf[self.len..]) {
                Ok(0) => {
                    return Err(DigestError::SourceRead {
                        path: self.path.clone(),
                        source: io::Error::new(
                            ErrorKind::UnexpectedEof,
                            "file ended before its reported size",
                        ),
                    })
                }
                Ok(read) => self.len += read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(DigestError::SourceRead {
                        path: self.path.clone(),
                        source,
                    })
                }
            }
        }

        trace!(path = %self.path.display(), buffered = self.len, "refilled read-ahead window");
        Ok(())
    }
}
