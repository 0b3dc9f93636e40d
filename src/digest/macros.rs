/// Implements `Word` for a primitive unsigned integer.
///
/// The rotation triples are the FIPS 180-4 amounts for Σ0, Σ1 and σ0, σ1;
/// the last element of each σ triple is a plain right shift.
macro_rules! impl_word {
    (
        $word:ty, $width:expr, $k:expr, $variants:expr,
        big_sigma0: ($a0:expr, $a1:expr, $a2:expr),
        big_sigma1: ($b0:expr, $b1:expr, $b2:expr),
        small_sigma0: ($c0:expr, $c1:expr, $c2:expr),
        small_sigma1: ($d0:expr, $d1:expr, $d2:expr),
        $read_into:ident, $write_into:ident
    ) => {
        impl $crate::digest::word::Word for $word {
            const WIDTH: $crate::digest::variant::WordWidth = $width;
            const BYTES: usize = ::std::mem::size_of::<$word>();
            const K: &'static [$word] = &$k;
            const VARIANTS: &'static [($crate::digest::variant::Variant, [$word; 8])] = &$variants;

            #[inline(always)]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$word>::wrapping_add(self, rhs)
            }

            #[inline(always)]
            fn big_sigma0(self) -> Self {
                self.rotate_right($a0) ^ self.rotate_right($a1) ^ self.rotate_right($a2)
            }

            #[inline(always)]
            fn big_sigma1(self) -> Self {
                self.rotate_right($b0) ^ self.rotate_right($b1) ^ self.rotate_right($b2)
            }

            #[inline(always)]
            fn small_sigma0(self) -> Self {
                self.rotate_right($c0) ^ self.rotate_right($c1) ^ (self >> $c2)
            }

            #[inline(always)]
            fn small_sigma1(self) -> Self {
                self.rotate_right($d0) ^ self.rotate_right($d1) ^ (self >> $d2)
            }

            fn read_be_into(src: &[u8], dst: &mut [Self]) {
                <::byteorder::BigEndian as ::byteorder::ByteOrder>::$read_into(src, dst)
            }

            fn write_be_into(src: &[Self], dst: &mut [u8]) {
                <::byteorder::BigEndian as ::byteorder::ByteOrder>::$write_into(src, dst)
            }
        }
    };
}
