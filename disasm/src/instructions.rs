//! # ARM Instruction Decoding
//!
//! Turns a classified 32 bit word into an [`ArmModeInstruction`] holding
//! every field the disassembly needs, then renders it as one line of
//! assembly.
//!
//! ## Instruction Encoding Example
//!
//! ```text
//! ADD R0,R1,R2,LSL #3
//!
//! 31-28  27-26  25  24-21  20  19-16  15-12  11-7   6-5  4  3-0
//! [1110] [ 00 ] [0] [0100] [0] [0001] [0000] [00011][00] [0][0010]
//!   ↑       ↑    ↑    ↑     ↑    ↑      ↑      ↑     ↑   ↑   ↑
//!   │       │    │    │     │    │      │      │     │   │   └─ Rm = R2
//!   │       │    │    │     │    │      │      │     │   └──── Shift by imm
//!   │       │    │    │     │    │      │      │     └──────── LSL
//!   │       │    │    │     │    │      │      └────────────── Shift = 3
//!   │       │    │    │     │    │      └───────────────────── Rd = R0
//!   │       │    │    │     │    └──────────────────────────── Rn = R1
//!   │       │    │    │     └───────────────────────────────── S = 0 (no flags)
//!   │       │    │    └─────────────────────────────────────── ADD opcode
//!   │       │    └──────────────────────────────────────────── Register operand
//!   │       └───────────────────────────────────────────────── Data processing
//!   └───────────────────────────────────────────────────────── Always execute
//! ```
//!
//! Output uses `,` between operands with no spaces, registers are always
//! `R0`..`R15` and immediates are decimal.

use std::fmt::Write;

use crate::addressing::{AddressExpression, BlockAddressingMode};
use crate::alu_instruction::{AluInstructionKind, ArmModeAluInstr, Kind};
use crate::bitwise::Bits;
use crate::classifier::{Family, classify};
use crate::condition::Condition;
use crate::error::DecodeError;
use crate::flags::{Indexing, LoadStoreKind, ReadWriteKind};
use crate::operand::AluSecondOperandInfo;
use crate::psr::{PsrKind, PsrOpKind};
use crate::register_list::RegisterList;

/// Bytes per ARM instruction word.
pub const SIZE_OF_ARM_INSTRUCTION: usize = 4;

/// Offset between the address of an instruction and the program counter
/// value it observes (two instructions of prefetch).
pub const PIPELINE_OFFSET: u32 = 8;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArmModeMultiplyVariant {
    Mul,
    Mla,
}

impl From<u32> for ArmModeMultiplyVariant {
    /// The accumulate bit (21) picks the variant.
    fn from(op_code: u32) -> Self {
        if op_code.get_bit(21) { Self::Mla } else { Self::Mul }
    }
}

/// All the supported ARM instructions after decoding.
///
/// | Variant              | Example Instructions | Description                  |
/// |----------------------|----------------------|------------------------------|
/// | `SingleDataSwap`     | SWP, SWPB            | Atomic memory swap           |
/// | `Multiply`           | MUL, MLA             | 32-bit multiply              |
/// | `DataProcessing`     | AND, ADD, CMP, MOV   | ALU operations               |
/// | `PSRTransfer`        | MRS, MSR             | Status register access       |
/// | `Branch`             | B, BL                | Branch (and link)            |
/// | `SingleDataTransfer` | LDR, STR, LDRB       | 32-bit and byte loads/stores |
/// | `BlockDataTransfer`  | LDM, STM             | Multiple register transfer   |
/// | `SoftwareInterrupt`  | SWI                  | Supervisor call              |
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ArmModeInstruction {
    SingleDataSwap {
        condition: Condition,
        quantity: ReadWriteKind,
        /// Base register (address).
        rn: u32,
        /// Destination register.
        rd: u32,
        /// Source register.
        rm: u32,
    },
    Multiply {
        variant: ArmModeMultiplyVariant,
        condition: Condition,
        should_set_codes: bool,
        rd_destination_register: u32,
        rn_accumulate_register: u32,
        rs_operand_register: u32,
        rm_operand_register: u32,
    },
    DataProcessing {
        condition: Condition,
        alu_instruction: ArmModeAluInstr,
        set_conditions: bool,
        rn: u32,
        destination: u32,
        op2: AluSecondOperandInfo,
    },
    PSRTransfer {
        condition: Condition,
        psr_kind: PsrKind,
        kind: PsrOpKind,
    },
    Branch {
        condition: Condition,
        link: bool,
        /// Byte offset from the program counter, already sign extended.
        offset: i32,
    },
    SingleDataTransfer {
        condition: Condition,
        kind: LoadStoreKind,
        quantity: ReadWriteKind,
        /// Post-indexed with W set: the access is done with user mode
        /// privileges (`LDRT`/`STRT`).
        user_mode: bool,
        rd: u32,
        address: AddressExpression,
    },
    BlockDataTransfer {
        condition: Condition,
        kind: LoadStoreKind,
        mode: BlockAddressingMode,
        load_psr: bool,
        write_back: bool,
        rn: u32,
        register_list: RegisterList,
    },
    SoftwareInterrupt {
        condition: Condition,
        comment: u32,
    },
}

impl ArmModeInstruction {
    /// Decodes a word already known to belong to `family`.
    #[must_use]
    pub fn decode_family(family: Family, op_code: u32) -> Self {
        let condition = Condition::of(op_code);

        match family {
            Family::DataSwap => Self::SingleDataSwap {
                condition,
                quantity: op_code.get_bit(22).into(),
                rn: op_code.get_bits(16..=19),
                rd: op_code.get_bits(12..=15),
                rm: op_code.get_bits(0..=3),
            },
            Family::Multiply => Self::Multiply {
                variant: op_code.into(),
                condition,
                should_set_codes: op_code.get_bit(20),
                rd_destination_register: op_code.get_bits(16..=19),
                rn_accumulate_register: op_code.get_bits(12..=15),
                rs_operand_register: op_code.get_bits(8..=11),
                rm_operand_register: op_code.get_bits(0..=3),
            },
            Family::DataProcessing => match PsrOpKind::decode(op_code) {
                Some(kind) => Self::PSRTransfer {
                    condition,
                    psr_kind: op_code.get_bit(22).into(),
                    kind,
                },
                None => Self::DataProcessing {
                    condition,
                    alu_instruction: op_code.get_bits(21..=24).into(),
                    set_conditions: op_code.get_bit(20),
                    rn: op_code.get_bits(16..=19),
                    destination: op_code.get_bits(12..=15),
                    op2: op_code.into(),
                },
            },
            Family::Branch => Self::Branch {
                condition,
                link: op_code.get_bit(24),
                offset: (op_code.get_bits(0..=23) << 2).sign_extended(26) as i32,
            },
            Family::SingleDataTransfer => {
                let address = AddressExpression::from(op_code);
                Self::SingleDataTransfer {
                    condition,
                    kind: op_code.get_bit(20).into(),
                    quantity: op_code.get_bit(22).into(),
                    user_mode: address.indexing == Indexing::Post && address.write_back,
                    rd: op_code.get_bits(12..=15),
                    address,
                }
            }
            Family::BlockDataTransfer => Self::BlockDataTransfer {
                condition,
                kind: op_code.get_bit(20).into(),
                mode: op_code.into(),
                load_psr: op_code.get_bit(22),
                write_back: op_code.get_bit(21),
                rn: op_code.get_bits(16..=19),
                register_list: op_code.into(),
            },
            Family::SoftwareInterrupt => Self::SoftwareInterrupt {
                condition,
                comment: op_code.get_bits(0..=23),
            },
        }
    }

    #[must_use]
    pub const fn condition(&self) -> Condition {
        match self {
            Self::SingleDataSwap { condition, .. }
            | Self::Multiply { condition, .. }
            | Self::DataProcessing { condition, .. }
            | Self::PSRTransfer { condition, .. }
            | Self::Branch { condition, .. }
            | Self::SingleDataTransfer { condition, .. }
            | Self::BlockDataTransfer { condition, .. }
            | Self::SoftwareInterrupt { condition, .. } => *condition,
        }
    }

    /// Writes the assembly for this instruction, `address` is where the
    /// instruction sits and is only needed to resolve branch targets.
    ///
    /// # Errors
    ///
    /// Only fails when `out` does.
    pub fn write_disassembly(&self, out: &mut impl Write, address: u32) -> std::fmt::Result {
        match *self {
            Self::SingleDataSwap {
                condition,
                quantity,
                rn,
                rd,
                rm,
            } => write!(out, "SWP{condition}{quantity} R{rd},R{rm},[R{rn}]"),
            Self::Multiply {
                variant,
                condition,
                should_set_codes,
                rd_destination_register,
                rn_accumulate_register,
                rs_operand_register,
                rm_operand_register,
            } => {
                let set_string = if should_set_codes { "S" } else { "" };
                let (rd, rs, rm) = (
                    rd_destination_register,
                    rs_operand_register,
                    rm_operand_register,
                );
                match variant {
                    ArmModeMultiplyVariant::Mul => {
                        write!(out, "MUL{condition}{set_string} R{rd},R{rs},R{rm}")
                    }
                    ArmModeMultiplyVariant::Mla => write!(
                        out,
                        "MLA{condition}{set_string} R{rd},R{rs},R{rm},R{rn_accumulate_register}"
                    ),
                }
            }
            Self::DataProcessing {
                condition,
                alu_instruction,
                set_conditions,
                rn,
                destination,
                op2,
            } => {
                let set_string = if set_conditions { "S" } else { "" };
                match alu_instruction.kind() {
                    AluInstructionKind::Comparison => {
                        write!(out, "{alu_instruction}{condition} R{rn},{op2}")
                    }
                    AluInstructionKind::Move => {
                        write!(out, "{alu_instruction}{condition}{set_string} R{destination},{op2}")
                    }
                    AluInstructionKind::Binary => write!(
                        out,
                        "{alu_instruction}{condition}{set_string} R{destination},R{rn},{op2}"
                    ),
                }
            }
            Self::PSRTransfer {
                condition,
                psr_kind,
                kind,
            } => match kind {
                PsrOpKind::Mrs {
                    destination_register,
                } => write!(out, "MRS{condition} R{destination_register},{psr_kind}"),
                PsrOpKind::Msr { operand } => write!(out, "MSR{condition} {psr_kind},{operand}"),
                PsrOpKind::MsrFlg { operand } => {
                    write!(out, "MSR{condition} {psr_kind}_flg,{operand}")
                }
            },
            Self::Branch {
                condition,
                link,
                offset,
            } => {
                let link = if link { "L" } else { "" };
                let target = address
                    .wrapping_add(PIPELINE_OFFSET)
                    .wrapping_add_signed(offset);
                write!(out, "B{link}{condition} 0x{target:08X}")
            }
            Self::SingleDataTransfer {
                condition,
                kind,
                quantity,
                user_mode,
                rd,
                address,
            } => {
                let op = match kind {
                    LoadStoreKind::Load => "LDR",
                    LoadStoreKind::Store => "STR",
                };
                let t = if user_mode { "T" } else { "" };
                write!(out, "{op}{condition}{quantity}{t} R{rd},{address}")
            }
            Self::BlockDataTransfer {
                condition,
                kind,
                mode,
                load_psr,
                write_back,
                rn,
                register_list,
            } => {
                let op = match kind {
                    LoadStoreKind::Load => "LDM",
                    LoadStoreKind::Store => "STM",
                };
                let w = if write_back { "!" } else { "" };
                let psr = if load_psr { "^" } else { "" };
                write!(out, "{op}{condition}{mode} R{rn}{w},{register_list}{psr}")
            }
            Self::SoftwareInterrupt { condition, comment } => {
                write!(out, "SWI{condition} =0x{comment:x}")
            }
        }
    }

    /// The assembly for this instruction as an owned string.
    #[must_use]
    pub fn disassembler(&self, address: u32) -> String {
        let mut line = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_disassembly(&mut line, address);
        line
    }
}

impl TryFrom<u32> for ArmModeInstruction {
    type Error = DecodeError;

    fn try_from(op_code: u32) -> Result<Self, Self::Error> {
        let Some(family) = classify(op_code) else {
            tracing::debug!("not identified instruction: 0x{op_code:08X}");
            return Err(DecodeError::Unrecognized { word: op_code });
        };

        tracing::debug!("0x{op_code:08X} classified as {family}");
        Ok(Self::decode_family(family, op_code))
    }
}
