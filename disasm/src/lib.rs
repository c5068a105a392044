//! # ARM Instruction Set (32-bit) Disassembler
//!
//! Decodes ARM instruction words into one line of assembly each.
//!
//! ## Format
//!
//! ```text
//! 31-28   27-25   24-0
//! [Cond] [Format] [Instruction-specific]
//! ```
//!
//! - **Condition (bits 28-31)**: See [`condition`]
//! - **Format (bits 25-27)**: Determines the family, see [`classifier`]
//!
//! ## Supported Families
//!
//! | Family                | Examples        |
//! |-----------------------|-----------------|
//! | Single Data Swap      | SWP, SWPB       |
//! | Multiply              | MUL, MLA        |
//! | Data Processing / PSR | AND, MOV, MRS   |
//! | Branch                | B, BL           |
//! | Single Data Transfer  | LDR, STRB       |
//! | Block Data Transfer   | LDM, STM        |
//! | Software Interrupt    | SWI             |
//!
//! ```
//! assert_eq!(disasm::disassemble(0xE3A0_1005, 0).unwrap(), "MOV R1,#5");
//! ```

pub mod addressing;
pub mod alu_instruction;

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_possible_wrap)]
pub mod bitwise;
pub mod classifier;

#[allow(clippy::cast_possible_truncation)]
pub mod condition;

#[allow(clippy::cast_possible_truncation)]
pub mod dispatch;
pub mod error;
pub mod flags;

#[allow(clippy::cast_possible_wrap)]
#[allow(clippy::similar_names)]
pub mod instructions;
pub mod opcode;
pub mod operand;
pub mod psr;
pub mod reader;

#[allow(clippy::cast_possible_truncation)]
pub mod register_list;

pub use classifier::{Family, classify};
pub use dispatch::{Disassembler, Options, Summary, UnknownPolicy};
pub use error::{DecodeError, DisasmError};
pub use instructions::ArmModeInstruction;
pub use opcode::{ArmModeOpcode, disassemble};
pub use reader::WordReader;
