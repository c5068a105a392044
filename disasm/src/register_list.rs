use std::fmt::{Display, Write};

use crate::bitwise::Bits;

/// The 16 bit register set of a block data transfer, bit `i` set means
/// `Ri` takes part in the transfer.
///
/// Runs of consecutive registers are printed as ranges, so `0x40F0` shows
/// as `{R4-R7,R14}`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RegisterList(pub u16);

impl RegisterList {
    /// Maximal runs of set bits as inclusive `(low, high)` pairs, ascending.
    pub fn runs(self) -> impl Iterator<Item = (u8, u8)> {
        let mask = self.0;
        let mut register = 0_u8;

        std::iter::from_fn(move || {
            while register < 16 && !mask.get_bit(register) {
                register += 1;
            }
            if register == 16 {
                return None;
            }

            let low = register;
            while register < 16 && mask.get_bit(register) {
                register += 1;
            }
            Some((low, register - 1))
        })
    }
}

impl From<u32> for RegisterList {
    /// Takes the low half of a block data transfer word.
    fn from(op_code: u32) -> Self {
        Self(op_code.get_bits(0..=15) as u16)
    }
}

impl Display for RegisterList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('{')?;
        for (idx, (low, high)) in self.runs().enumerate() {
            if idx > 0 {
                f.write_char(',')?;
            }
            if low == high {
                write!(f, "R{low}")?;
            } else {
                write!(f, "R{low}-R{high}")?;
            }
        }
        f.write_char('}')
    }
}
