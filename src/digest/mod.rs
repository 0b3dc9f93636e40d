use tracing::debug;

use crate::error::DigestError;
use crate::options::DigestOptions;

use self::chunked::BlockAssembler;
use self::format::Digest;
use self::stream::{Source, StreamState};
use self::variant::Params;
use self::word::Word;

#[macro_use]
mod macros;
pub mod chunked;
pub mod format;
pub mod sha2;
pub mod stream;
pub mod variant;
pub mod word;

/// Hashes `source`, optionally preceded by one injected block, and returns
/// the final state.
pub(crate) fn hash_source<W: Word>(
    params: &Params<W>,
    source: &Source<'_>,
    injected: Option<&[u8]>,
    read_ahead: usize,
) -> Result<[W; 8], DigestError> {
    let stream = StreamState::open(source, read_ahead)?;
    debug!(
        variant = %params.variant,
        source = source.kind(),
        len = stream.remaining(),
        injected = injected.is_some(),
        "hashing"
    );
    let mut assembler = BlockAssembler::new(stream, W::WIDTH, injected);
    sha2::hash_state(params, &mut assembler)
}

pub(crate) fn digest_source<W: Word>(
    params: &Params<W>,
    source: &Source<'_>,
    options: &DigestOptions,
) -> Result<Digest, DigestError> {
    let state = hash_source(params, source, None, options.read_ahead)?;
    Ok(format::render(&state, params.truncation, options.output))
}
