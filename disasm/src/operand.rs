//! # Second Operand
//!
//! Data processing instructions (and single data transfers, for their
//! offset) take a flexible second operand that goes through the barrel
//! shifter:
//!
//! ```text
//! I=1   11-8    7-0
//!      [rot ] [ imm8 ]          value = imm8 ROR (2 * rot)
//!
//! I=0   11-7    6-5  4  3-0
//!      [amount][typ][0][ Rm ]   Rm shifted by an immediate
//!
//! I=0   11-8  7  6-5  4  3-0
//!      [ Rs ][0][typ][1][ Rm ]  Rm shifted by the bottom byte of Rs
//! ```
//!
//! A zero immediate amount is special: `LSL #0` is the plain register,
//! `LSR #0`/`ASR #0` encode a shift by 32 and `ROR #0` encodes `RRX`.

use std::fmt::Display;

use crate::bitwise::Bits;
use crate::flags::{OperandKind, ShiftKind};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShiftOperator {
    Immediate(u32),
    Register(u32),
}

impl Display for ShiftOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immediate(value) => write!(f, "#{value}"),
            Self::Register(register) => write!(f, "R{register}"),
        }
    }
}

/// A register operand together with its shift.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShiftedRegister {
    pub register: u32,
    pub shift_kind: ShiftKind,
    pub shift_op: ShiftOperator,
}

impl From<u32> for ShiftedRegister {
    /// Reads the register form of operand 2 out of a whole instruction word.
    fn from(op_code: u32) -> Self {
        let shift_op = if op_code.get_bit(4) {
            ShiftOperator::Register(op_code.get_bits(8..=11))
        } else {
            ShiftOperator::Immediate(op_code.get_bits(7..=11))
        };

        Self {
            register: op_code.get_bits(0..=3),
            shift_kind: op_code.get_bits(5..=6).into(),
            shift_op,
        }
    }
}

impl Display for ShiftedRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            register,
            shift_kind,
            shift_op,
        } = *self;

        if shift_op == ShiftOperator::Immediate(0) {
            return match shift_kind {
                ShiftKind::Lsl => write!(f, "R{register}"),
                ShiftKind::Ror => write!(f, "R{register},RRX"),
                ShiftKind::Lsr | ShiftKind::Asr => write!(f, "R{register},{shift_kind} #32"),
            };
        }

        write!(f, "R{register},{shift_kind} {shift_op}")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AluSecondOperandInfo {
    Register(ShiftedRegister),
    Immediate {
        base: u32,
        /// Already doubled, in bits.
        shift: u32,
    },
}

impl From<u32> for AluSecondOperandInfo {
    /// Decodes operand 2 of a data processing word, bit 25 picks the form.
    fn from(op_code: u32) -> Self {
        match OperandKind::from(op_code.get_bit(25)) {
            OperandKind::Immediate => Self::Immediate {
                base: op_code.get_bits(0..=7),
                shift: op_code.get_bits(8..=11) * 2,
            },
            OperandKind::Register => Self::Register(ShiftedRegister::from(op_code)),
        }
    }
}

impl Display for AluSecondOperandInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Register(shifted) => shifted.fmt(f),
            Self::Immediate { base, shift } => write!(f, "#{}", base.rotate_right(shift)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn immediate_operand() {
        // MOV R1,#5
        let op2 = AluSecondOperandInfo::from(0xE3A0_1005);
        assert_eq!(op2, AluSecondOperandInfo::Immediate { base: 5, shift: 0 });
        assert_eq!(op2.to_string(), "#5");
    }

    #[test]
    fn rotated_immediate_operand() {
        // 0xFF rotated right by 8 -> 0xFF000000
        let op2 = AluSecondOperandInfo::from(0xE3A0_04FF);
        assert_eq!(op2.to_string(), "#4278190080");

        // 0x3F rotated right by 30 -> 0xFC
        let op2 = AluSecondOperandInfo::from(0xE3A0_0F3F);
        assert_eq!(op2.to_string(), "#252");
    }

    #[test]
    fn plain_register_operand() {
        // MOV R0,R2
        let op2 = AluSecondOperandInfo::from(0xE1A0_0002);
        assert_eq!(op2.to_string(), "R2");
    }

    #[test]
    fn register_shifted_by_immediate() {
        // ADD R0,R1,R2,LSL #3
        let op2 = AluSecondOperandInfo::from(0xE081_0182);
        assert_eq!(
            op2,
            AluSecondOperandInfo::Register(ShiftedRegister {
                register: 2,
                shift_kind: ShiftKind::Lsl,
                shift_op: ShiftOperator::Immediate(3),
            })
        );
        assert_eq!(op2.to_string(), "R2,LSL #3");

        // ASR #31
        assert_eq!(
            AluSecondOperandInfo::from(0xE1A0_0FC1).to_string(),
            "R1,ASR #31"
        );
    }

    #[test]
    fn zero_shift_encodings() {
        // LSR #0 is LSR #32
        assert_eq!(AluSecondOperandInfo::from(0xE1A0_0021).to_string(), "R1,LSR #32");
        // ASR #0 is ASR #32
        assert_eq!(AluSecondOperandInfo::from(0xE1A0_0041).to_string(), "R1,ASR #32");
        // ROR #0 is RRX
        assert_eq!(AluSecondOperandInfo::from(0xE1A0_0061).to_string(), "R1,RRX");
    }

    #[test]
    fn register_shifted_by_register() {
        // MOV R0,R1,ROR R3
        let op2 = AluSecondOperandInfo::from(0xE1A0_0371);
        assert_eq!(
            op2,
            AluSecondOperandInfo::Register(ShiftedRegister {
                register: 1,
                shift_kind: ShiftKind::Ror,
                shift_op: ShiftOperator::Register(3),
            })
        );
        assert_eq!(op2.to_string(), "R1,ROR R3");
    }
}
