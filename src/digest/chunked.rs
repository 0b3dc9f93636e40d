use byteorder::{BigEndian, ByteOrder};
use tracing::trace;

use crate::error::DigestError;

use super::stream::StreamState;
use super::variant::WordWidth;

/// Largest block of any variant, in bytes.
pub(crate) const MAX_BLOCK_LEN: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Data,
    /// Carries the message length; nothing follows it.
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Message,
    // The 0x80 byte went out but the length field did not fit behind it.
    LengthOnly,
    Finished,
}

/// Cuts a source into blocks and applies the SHA-2 padding.
pub(crate) struct BlockAssembler<'a> {
    stream: StreamState<'a>,
    block_len: usize,
    length_field_len: usize,
    // Emitted verbatim ahead of the source, once.
    injected: Option<&'a [u8]>,
    phase: Phase,
}

impl<'a> BlockAssembler<'a> {
    pub fn new(stream: StreamState<'a>, width: WordWidth, injected: Option<&'a [u8]>) -> Self {
        let block_len = width.block_len();
        debug_assert!(injected.map_or(true, |block| block.len() == block_len));
        BlockAssembler {
            stream,
            block_len,
            length_field_len: width.length_field_len(),
            injected,
            phase: Phase::Message,
        }
    }

    /// Fills `block` with the next block of the padded message. Returns
    /// `None` once the terminal block has been produced.
    pub fn next_block(&mut self, block: &mut [u8]) -> Result<Option<BlockKind>, DigestError> {
        debug_assert_eq!(block.len(), self.block_len);

        match self.phase {
            Phase::Finished => Ok(None),
            Phase::LengthOnly => {
                block.fill(0);
                self.write_length(block);
                self.phase = Phase::Finished;
                Ok(Some(BlockKind::Terminal))
            }
            Phase::Message => {
                if let Some(injected) = self.injected.take() {
                    block.copy_from_slice(injected);
                    self.stream.extend_logical(self.block_len);
                    return Ok(Some(BlockKind::Data));
                }

                let remaining = self.stream.remaining();
                if remaining >= self.block_len as u64 {
                    block.copy_from_slice(self.stream.take(self.block_len)?);
                    return Ok(Some(BlockKind::Data));
                }

                // Final region: tail bytes, the 1 bit, zeros
                let tail = remaining as usize;
                block[..tail].copy_from_slice(self.stream.take(tail)?);
                block[tail] = 0x80;
                block[tail + 1..].fill(0);

                if self.block_len - tail - 1 >= self.length_field_len {
                    self.write_length(block);
                    self.phase = Phase::Finished;
                    trace!(tail, "padding and length share the final block");
                    Ok(Some(BlockKind::Terminal))
                } else {
                    self.phase = Phase::LengthOnly;
                    trace!(tail, "length field moves to an extra block");
                    Ok(Some(BlockKind::Data))
                }
            }
        }
    }

    // Only the low 64 bits of the count are written; the upper half of the
    // 128-bit field of the 64-bit family stays zero.
    fn write_length(&self, block: &mut [u8]) {
        let bits = self.stream.logical_len().wrapping_mul(8);
        BigEndian::write_u64(&mut block[self.block_len - 8..], bits);
    }
}
