//! # Condition Field
//!
//! Every ARM instruction carries a condition in its top 4 bits (31-28).
//! In assembly it shows up as a two letter suffix glued to the mnemonic:
//!
//! ```text
//! ┌───────┬────────┬─────────────────────┐
//! │ Code  │ Suffix │     Meaning         │
//! ├───────┼────────┼─────────────────────┤
//! │ 0000  │   EQ   │ Equal               │
//! │ 0001  │   NE   │ Not equal           │
//! │ 0010  │   CS   │ Carry set / ≥ (uns) │
//! │ 0011  │   CC   │ Carry clear / < (u) │
//! │ 0100  │   MI   │ Minus / negative    │
//! │ 0101  │   PL   │ Plus / non-negative │
//! │ 0110  │   VS   │ Overflow set        │
//! │ 0111  │   VC   │ Overflow clear      │
//! │ 1000  │   HI   │ Higher (unsigned)   │
//! │ 1001  │   LS   │ Lower/same (unsig)  │
//! │ 1010  │   GE   │ ≥ (signed)          │
//! │ 1011  │   LT   │ < (signed)          │
//! │ 1100  │   GT   │ > (signed)          │
//! │ 1101  │   LE   │ ≤ (signed)          │
//! │ 1110  │        │ Always              │
//! │ 1111  │   NV   │ Never (reserved)    │
//! └───────┴────────┴─────────────────────┘
//! ```
//!
//! "Always" is the default and prints nothing, so `MOV R1,#5` rather than
//! `MOVAL R1,#5`.

use crate::bitwise::Bits;

/// Condition codes for ARM conditional execution.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Condition {
    /// Equal (Z=1)
    EQ = 0x0,
    /// Not equal (Z=0)
    NE = 0x1,
    /// Carry set / unsigned higher or same (C=1)
    CS = 0x2,
    /// Carry clear / unsigned lower (C=0)
    CC = 0x3,
    /// Minus / negative (N=1)
    MI = 0x4,
    /// Plus / positive or zero (N=0)
    PL = 0x5,
    /// Overflow set (V=1)
    VS = 0x6,
    /// Overflow clear (V=0)
    VC = 0x7,
    /// Unsigned higher (C=1 AND Z=0)
    HI = 0x8,
    /// Unsigned lower or same (C=0 OR Z=1)
    LS = 0x9,
    /// Signed greater or equal (N=V)
    GE = 0xA,
    /// Signed less than (N≠V)
    LT = 0xB,
    /// Signed greater than (Z=0 AND N=V)
    GT = 0xC,
    /// Signed less than or equal (Z=1 OR N≠V)
    LE = 0xD,
    /// Always (unconditional)
    AL = 0xE,
    /// Never. Reserved since `ARMv3`, still rendered so that
    /// disassembly of odd words stays deterministic.
    NV = 0xF,
}

impl Condition {
    /// Suffix printed after the mnemonic, empty for [`Condition::AL`].
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::EQ => "EQ",
            Self::NE => "NE",
            Self::CS => "CS",
            Self::CC => "CC",
            Self::MI => "MI",
            Self::PL => "PL",
            Self::VS => "VS",
            Self::VC => "VC",
            Self::HI => "HI",
            Self::LS => "LS",
            Self::GE => "GE",
            Self::LT => "LT",
            Self::GT => "GT",
            Self::LE => "LE",
            Self::AL => "",
            Self::NV => "NV",
        }
    }

    /// Reads the condition field (bits 31-28) of an instruction word.
    #[must_use]
    pub fn of(op_code: u32) -> Self {
        Self::from(op_code.get_bits(28..=31) as u8)
    }
}

impl From<u8> for Condition {
    /// Only the low nibble is looked at.
    fn from(item: u8) -> Self {
        match item & 0xF {
            0x0 => Self::EQ,
            0x1 => Self::NE,
            0x2 => Self::CS,
            0x3 => Self::CC,
            0x4 => Self::MI,
            0x5 => Self::PL,
            0x6 => Self::VS,
            0x7 => Self::VC,
            0x8 => Self::HI,
            0x9 => Self::LS,
            0xA => Self::GE,
            0xB => Self::LT,
            0xC => Self::GT,
            0xD => Self::LE,
            0xE => Self::AL,
            _ => Self::NV,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_condition_has_a_suffix() {
        let expected = [
            "EQ", "NE", "CS", "CC", "MI", "PL", "VS", "VC", "HI", "LS", "GE", "LT", "GT", "LE", "",
            "NV",
        ];

        for (code, suffix) in (0_u8..16).zip(expected) {
            let condition = Condition::from(code);
            assert_eq!(condition as u8, code);
            assert_eq!(condition.to_string(), suffix);
        }
    }

    #[test]
    fn reads_top_nibble() {
        assert_eq!(Condition::of(0xE3A0_1005), Condition::AL);
        assert_eq!(Condition::of(0x0A00_0000), Condition::EQ);
        assert_eq!(Condition::of(0x1A00_0000), Condition::NE);
        assert_eq!(Condition::of(0xF000_0000), Condition::NV);
    }

    #[test]
    fn ignores_high_nibble_of_input_byte() {
        assert_eq!(Condition::from(0xF1), Condition::NE);
    }
}
