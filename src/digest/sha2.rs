use crate::error::DigestError;

use super::chunked::{BlockAssembler, BlockKind, MAX_BLOCK_LEN};
use super::variant::Params;
use super::word::Word;

/// Longest message schedule of any variant.
const MAX_ROUNDS: usize = 80;

/// Folds one block of message words into `state`.
pub fn compress<W: Word>(state: &mut [W; 8], block: &[W; 16]) {
    let rounds = W::K.len();

    // Message schedule
    let mut w = [W::default(); MAX_ROUNDS];
    w[..16].copy_from_slice(block);
    for i in 16..rounds {
        w[i] = w[i-16]
            .wrapping_add(w[i-15].small_sigma0())
            .wrapping_add(w[i-7])
            .wrapping_add(w[i-2].small_sigma1());
    }

    // Copy hash state
    let mut h = *state;

    for i in 0..rounds {
        let temp1 = h[7]
            .wrapping_add(h[4].big_sigma1())
            .wrapping_add(W::choose(h[4], h[5], h[6]))
            .wrapping_add(W::K[i])
            .wrapping_add(w[i]);
        let temp2 = h[0].big_sigma0().wrapping_add(W::majority(h[0], h[1], h[2]));

        for i in (0..7).rev() {
            h[i+1] = h[i];
        }
        h[4] = h[4].wrapping_add(temp1);
        h[0] = temp1.wrapping_add(temp2);
    }

    // Update hash state
    for i in 0..8 {
        state[i] = state[i].wrapping_add(h[i]);
    }
}

/// Runs every block the assembler produces through the compression function,
/// starting from the variant's initial state.
pub(crate) fn hash_state<W: Word>(
    params: &Params<W>,
    assembler: &mut BlockAssembler<'_>,
) -> Result<[W; 8], DigestError> {
    let block_len = 16 * W::BYTES;
    let mut bytes = [0u8; MAX_BLOCK_LEN];
    let mut block = [W::default(); 16];
    let mut state = params.iv;

    while let Some(kind) = assembler.next_block(&mut bytes[..block_len])? {
        W::read_be_into(&bytes[..block_len], &mut block);
        compress(&mut state, &block);
        if kind == BlockKind::Terminal {
            break;
        }
    }
    Ok(state)
}
