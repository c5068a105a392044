//! # Addressing Modes
//!
//! Block data transfers name their addressing mode in the mnemonic, built
//! from the P (pre/post) and U (up/down) bits:
//!
//! | P | U | Mode | Meaning          |
//! |---|---|------|------------------|
//! | 1 | 1 | IB   | Increment before |
//! | 1 | 0 | DB   | Decrement before |
//! | 0 | 1 | IA   | Increment after  |
//! | 0 | 0 | DA   | Decrement after  |
//!
//! Single data transfers spell the address out as an operand instead:
//!
//! ```text
//! [Rn]                 pre-indexed, zero offset
//! [Rn,#-4]!            pre-indexed, immediate offset, write back
//! [Rn],#4              post-indexed, immediate offset
//! [Rn,-Rm,LSL #2]      pre-indexed, shifted register offset
//! [Rn],Rm,ASR #32      post-indexed, shifted register offset
//! ```

use std::fmt::Display;

use crate::bitwise::Bits;
use crate::flags::{Indexing, Offsetting, OperandKind};
use crate::operand::ShiftedRegister;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BlockAddressingMode {
    IncrementBefore,
    DecrementBefore,
    IncrementAfter,
    DecrementAfter,
}

impl BlockAddressingMode {
    #[must_use]
    pub const fn new(indexing: Indexing, offsetting: Offsetting) -> Self {
        match (indexing, offsetting) {
            (Indexing::Pre, Offsetting::Up) => Self::IncrementBefore,
            (Indexing::Pre, Offsetting::Down) => Self::DecrementBefore,
            (Indexing::Post, Offsetting::Up) => Self::IncrementAfter,
            (Indexing::Post, Offsetting::Down) => Self::DecrementAfter,
        }
    }
}

impl From<u32> for BlockAddressingMode {
    fn from(op_code: u32) -> Self {
        Self::new(op_code.get_bit(24).into(), op_code.get_bit(23).into())
    }
}

impl Display for BlockAddressingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncrementBefore => f.write_str("IB"),
            Self::DecrementBefore => f.write_str("DB"),
            Self::IncrementAfter => f.write_str("IA"),
            Self::DecrementAfter => f.write_str("DA"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SingleDataTransferOffsetInfo {
    Immediate { offset: u32 },
    Register(ShiftedRegister),
}

impl From<u32> for SingleDataTransferOffsetInfo {
    fn from(op_code: u32) -> Self {
        // The I bit is inverted compared to data processing.
        match OperandKind::from(!op_code.get_bit(25)) {
            OperandKind::Immediate => Self::Immediate {
                offset: op_code.get_bits(0..=11),
            },
            OperandKind::Register => Self::Register(ShiftedRegister::from(op_code)),
        }
    }
}

/// The `<address>` operand of `LDR`/`STR`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AddressExpression {
    pub base_register: u32,
    pub indexing: Indexing,
    pub offsetting: Offsetting,
    pub write_back: bool,
    pub offset_info: SingleDataTransferOffsetInfo,
}

impl From<u32> for AddressExpression {
    fn from(op_code: u32) -> Self {
        Self {
            base_register: op_code.get_bits(16..=19),
            indexing: op_code.get_bit(24).into(),
            offsetting: op_code.get_bit(23).into(),
            write_back: op_code.get_bit(21),
            offset_info: op_code.into(),
        }
    }
}

impl AddressExpression {
    fn write_offset(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = self.offsetting;
        match self.offset_info {
            SingleDataTransferOffsetInfo::Immediate { offset } => write!(f, "#{sign}{offset}"),
            SingleDataTransferOffsetInfo::Register(shifted) => write!(f, "{sign}{shifted}"),
        }
    }
}

impl Display for AddressExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let base = self.base_register;
        match self.indexing {
            Indexing::Pre => {
                write!(f, "[R{base}")?;
                let zero_up = self.offsetting == Offsetting::Up
                    && self.offset_info == (SingleDataTransferOffsetInfo::Immediate { offset: 0 });
                if !zero_up {
                    f.write_str(",")?;
                    self.write_offset(f)?;
                }
                f.write_str("]")?;
                if self.write_back {
                    f.write_str("!")?;
                }
                Ok(())
            }
            // Write back is implied, bit 21 asks for a user mode transfer
            // instead and shows up in the mnemonic.
            Indexing::Post => {
                write!(f, "[R{base}],")?;
                self.write_offset(f)
            }
        }
    }
}
