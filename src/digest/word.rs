use std::fmt::{Debug, LowerHex};
use std::ops::{BitAnd, BitXor, Not};

use super::variant::{Variant, WordWidth, K32, K64, VARIANTS32, VARIANTS64};

/// A SHA-2 state word.
///
/// Everything that differs between the 32-bit and 64-bit families lives
/// here: the round functions, the constant tables and the big-endian codec.
/// The compression loop, padding and formatting are written once against
/// this trait.
pub trait Word:
    Copy
    + Default
    + Eq
    + Debug
    + LowerHex
    + BitAnd<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Send
    + Sync
    + 'static
{
    const WIDTH: WordWidth;
    const BYTES: usize;
    /// Round constants, one per round.
    const K: &'static [Self];
    /// Initial hash values of every variant built on this word type.
    const VARIANTS: &'static [(Variant, [Self; 8])];

    fn wrapping_add(self, rhs: Self) -> Self;
    fn big_sigma0(self) -> Self;
    fn big_sigma1(self) -> Self;
    fn small_sigma0(self) -> Self;
    fn small_sigma1(self) -> Self;

    /// Decodes `src` as consecutive big-endian words. On little-endian hosts
    /// this byte-swaps each word; on big-endian hosts it is a copy.
    fn read_be_into(src: &[u8], dst: &mut [Self]);
    fn write_be_into(src: &[Self], dst: &mut [u8]);

    #[inline(always)]
    fn choose(x: Self, y: Self, z: Self) -> Self {
        (x & y) ^ (!x & z)
    }

    #[inline(always)]
    fn majority(x: Self, y: Self, z: Self) -> Self {
        (x & y) ^ (x & z) ^ (y & z)
    }
}

impl_word!(
    u32, WordWidth::W32, K32, VARIANTS32,
    big_sigma0: (2, 13, 22),
    big_sigma1: (6, 11, 25),
    small_sigma0: (7, 18, 3),
    small_sigma1: (17, 19, 10),
    read_u32_into, write_u32_into
);

impl_word!(
    u64, WordWidth::W64, K64, VARIANTS64,
    big_sigma0: (28, 34, 39),
    big_sigma1: (14, 18, 41),
    small_sigma0: (1, 8, 7),
    small_sigma1: (19, 61, 6),
    read_u64_into, write_u64_into
);
