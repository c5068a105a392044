//! # PSR Transfer (MRS / MSR)
//!
//! The status register transfers live inside the data processing encoding
//! space, on the comparison opcodes with S clear:
//!
//! ```text
//! MRS      cond 00010 P 001111 Rd   000000000000
//! MSR      cond 00010 P 101001111   00000000 Rm
//! MSR flg  cond 00 I 10 P 1010001111 source operand
//! ```
//!
//! P (bit 22) selects the saved PSR of the current mode instead of CPSR.

use std::fmt::Display;

use crate::bitwise::Bits;
use crate::operand::AluSecondOperandInfo;

const MRS_MASK: u32 = 0x0FBF_0FFF;
const MRS_PATTERN: u32 = 0x010F_0000;

const MSR_MASK: u32 = 0x0FBF_FFF0;
const MSR_PATTERN: u32 = 0x0129_F000;

const MSR_FLG_MASK: u32 = 0x0DBF_F000;
const MSR_FLG_PATTERN: u32 = 0x0128_F000;

#[must_use]
pub const fn is_mrs(op_code: u32) -> bool {
    op_code & MRS_MASK == MRS_PATTERN
}

#[must_use]
pub const fn is_msr(op_code: u32) -> bool {
    op_code & MSR_MASK == MSR_PATTERN
}

#[must_use]
pub const fn is_msr_flg(op_code: u32) -> bool {
    op_code & MSR_FLG_MASK == MSR_FLG_PATTERN
}

#[must_use]
pub const fn is_psr_transfer(op_code: u32) -> bool {
    is_msr(op_code) || is_msr_flg(op_code) || is_mrs(op_code)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PsrKind {
    Cpsr,
    Spsr,
}

impl From<bool> for PsrKind {
    fn from(value: bool) -> Self {
        if value { Self::Spsr } else { Self::Cpsr }
    }
}

impl Display for PsrKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpsr => f.write_str("CPSR"),
            Self::Spsr => f.write_str("SPSR"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PsrOpKind {
    /// Transfer PSR contents to a register.
    Mrs { destination_register: u32 },
    /// Transfer register contents to the whole PSR.
    Msr { operand: AluSecondOperandInfo },
    /// Transfer register contents or an immediate value to the flag bits only.
    MsrFlg { operand: AluSecondOperandInfo },
}

impl PsrOpKind {
    /// Sub-classifies a data processing word, `None` when it is a plain
    /// ALU operation.
    #[must_use]
    pub fn decode(op_code: u32) -> Option<Self> {
        if is_msr(op_code) {
            Some(Self::Msr {
                operand: op_code.into(),
            })
        } else if is_msr_flg(op_code) {
            Some(Self::MsrFlg {
                operand: op_code.into(),
            })
        } else if is_mrs(op_code) {
            Some(Self::Mrs {
                destination_register: op_code.get_bits(12..=15),
            })
        } else {
            None
        }
    }
}
