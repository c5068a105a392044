use std::ops::RangeInclusive;

/// Helpers to read fields out of an instruction word,
/// the index (`bit_idx`) is supposed to be from lsb to msb (right to left)
pub trait Bits: Copy {
    const WIDTH: u8;

    fn is_bit_on(&self, bit_idx: u8) -> bool;

    fn get_bit(&self, bit_idx: u8) -> bool {
        self.is_bit_on(bit_idx)
    }

    fn get_bits(&self, bits_range: RangeInclusive<u8>) -> Self;

    /// Returns a sign-extended copy of the value.
    /// `number_of_bits` is the width of the two's complement field
    /// stored in the low bits.
    fn sign_extended(&self, number_of_bits: u8) -> Self;
}

macro_rules! impl_bits {
    ($t:ty, $signed:ty) => {
        impl Bits for $t {
            const WIDTH: u8 = <$t>::BITS as u8;

            fn is_bit_on(&self, bit_idx: u8) -> bool {
                debug_assert!(bit_idx < Self::WIDTH);
                (*self >> bit_idx) & 1 == 1
            }

            fn get_bits(&self, bits_range: RangeInclusive<u8>) -> Self {
                let start = *bits_range.start();
                let end = *bits_range.end();
                debug_assert!(start <= end && end < Self::WIDTH);

                // `length` ones, moved back to position 0 after the shift.
                let length = u32::from(end - start + 1);
                let mask = <$t>::MAX.checked_shr(<$t>::BITS - length).unwrap_or(0);
                (*self >> start) & mask
            }

            fn sign_extended(&self, number_of_bits: u8) -> Self {
                debug_assert!(number_of_bits > 0 && number_of_bits <= Self::WIDTH);

                // Park the field's sign bit in the msb, then an arithmetic
                // shift drags it back down over the high bits.
                let shift = Self::WIDTH - number_of_bits;
                (((*self << shift) as $signed) >> shift) as $t
            }
        }
    };
}

impl_bits!(u32, i32);
impl_bits!(u16, i16);
