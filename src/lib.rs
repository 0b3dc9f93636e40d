//! SHA-2 message digests (224, 256, 384, 512, 512/224, 512/256) and HMAC,
//! over in-memory buffers or files streamed through a bounded window.
//!
//! ```no_run
//! use shadigest::{digest, hmac, DigestOptions, Source, Variant};
//!
//! let variant: Variant = "512/256".parse()?;
//! let text = digest(variant, Source::Memory(b"abc"), &DigestOptions::default())?;
//! let mac = hmac(variant, Source::File("data.bin".as_ref()), Source::Memory(b"key"), &DigestOptions::default().raw())?;
//! # Ok::<(), shadigest::DigestError>(())
//! ```

#[cfg(test)]
#[macro_use]
extern crate binary_macros;

use tracing::instrument;

pub mod digest;
pub mod error;
pub mod hmac;
pub mod options;
mod utils;

pub use crate::digest::format::{Digest, RawDigest};
pub use crate::digest::stream::{Source, DEFAULT_READ_AHEAD};
pub use crate::digest::variant::{lookup, lookup_named, Params, Truncation, Variant, WordWidth};
pub use crate::digest::word::Word;
pub use crate::error::DigestError;
pub use crate::options::{DigestOptions, OutputMode};

use crate::digest::digest_source;

/// What to compute over a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    Digest,
    Hmac { key: Source<'a> },
}

/// Digest of `source`.
pub fn digest(variant: Variant, source: Source<'_>, options: &DigestOptions) -> Result<Digest, DigestError> {
    compute(variant, source, Operation::Digest, options)
}

/// HMAC of `message` under `key`.
pub fn hmac(
    variant: Variant,
    message: Source<'_>,
    key: Source<'_>,
    options: &DigestOptions,
) -> Result<Digest, DigestError> {
    compute(variant, message, Operation::Hmac { key }, options)
}

#[instrument(skip_all, fields(variant = %variant))]
pub fn compute(
    variant: Variant,
    source: Source<'_>,
    operation: Operation<'_>,
    options: &DigestOptions,
) -> Result<Digest, DigestError> {
    match variant.width() {
        WordWidth::W32 => compute_with::<u32>(variant, &source, &operation, options),
        WordWidth::W64 => compute_with::<u64>(variant, &source, &operation, options),
    }
}

fn compute_with<W: Word>(
    variant: Variant,
    source: &Source<'_>,
    operation: &Operation<'_>,
    options: &DigestOptions,
) -> Result<Digest, DigestError> {
    let params = lookup::<W>(variant)?;
    match operation {
        Operation::Digest => digest_source(&params, source, options),
        Operation::Hmac { key } => hmac::hmac(&params, source, key, options),
    }
}
