use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    /// Name (or name/word width combination) that no variant answers to.
    #[error("unknown digest variant `{name}`")]
    UnknownVariant { name: String },
    #[error("failed to open `{}`", .path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read `{}`", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The HMAC key file could not be opened, measured, read or hashed.
    #[error("failed to load HMAC key from `{}`", .path.display())]
    KeySource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DigestError {
    /// Re-labels a source failure as a key failure. Used while the key file
    /// itself is being hashed.
    pub(crate) fn into_key_error(self) -> Self {
        match self {
            DigestError::SourceOpen { path, source } | DigestError::SourceRead { path, source } => {
                DigestError::KeySource { path, source }
            }
            other => other,
        }
    }
}
