//! # Instruction Families
//!
//! A word is sorted into a family by masking it and comparing against a
//! fixed pattern:
//!
//! ```text
//!                      27   24   20   16   12    8    4    0
//! Data swap          cond 0001 0B00 Rn   Rd   0000 1001 Rm
//! Multiply           cond 0000 00AS Rd   Rn   Rs   1001 Rm
//! Data processing    cond 00I  opcd S Rn Rd   operand 2
//! Branch             cond 101L offset
//! Single transfer    cond 01IP UBWL Rn   Rd   offset
//! Block transfer     cond 100P USWL Rn   register list
//! Software interrupt cond 1111 comment
//! ```
//!
//! The naive data processing mask (`00` in bits 27-26) also covers the
//! swap and multiply encodings, and everything else that lives in the
//! `bit 25 = 0, bit 7 = 1, bit 4 = 1` extension space (halfword transfers,
//! long multiplies). Those words are carved out of the data processing
//! predicate, as are the comparison opcodes with S clear that are not a
//! PSR transfer (the BX space, among others). The same goes for the
//! undefined `011x...1` space inside the single transfer mask. After these
//! cuts no word satisfies two predicates.
//!
//! [`classify`] still tries the families in the fixed order below and
//! stops at the first hit.

use std::fmt::Display;

use crate::psr::is_psr_transfer;

/// The instruction classes this disassembler understands, in the order
/// they are tried.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Family {
    DataSwap,
    Multiply,
    DataProcessing,
    Branch,
    SingleDataTransfer,
    BlockDataTransfer,
    SoftwareInterrupt,
}

impl Family {
    /// Every family, in priority order.
    pub const ALL: [Self; 7] = [
        Self::DataSwap,
        Self::Multiply,
        Self::DataProcessing,
        Self::Branch,
        Self::SingleDataTransfer,
        Self::BlockDataTransfer,
        Self::SoftwareInterrupt,
    ];

    /// Whether `op_code` belongs to this family.
    #[must_use]
    pub const fn matches(self, op_code: u32) -> bool {
        match self {
            Self::DataSwap => is_data_swap(op_code),
            Self::Multiply => is_multiply(op_code),
            Self::DataProcessing => is_data_processing(op_code),
            Self::Branch => is_branch(op_code),
            Self::SingleDataTransfer => is_single_data_transfer(op_code),
            Self::BlockDataTransfer => is_block_data_transfer(op_code),
            Self::SoftwareInterrupt => is_software_interrupt(op_code),
        }
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataSwap => f.write_str("data swap"),
            Self::Multiply => f.write_str("multiply"),
            Self::DataProcessing => f.write_str("data processing"),
            Self::Branch => f.write_str("branch"),
            Self::SingleDataTransfer => f.write_str("single data transfer"),
            Self::BlockDataTransfer => f.write_str("block data transfer"),
            Self::SoftwareInterrupt => f.write_str("software interrupt"),
        }
    }
}

/// `Rd := [Rn], [Rn] := Rm` as a single locked transfer.
#[must_use]
pub const fn is_data_swap(op_code: u32) -> bool {
    op_code & 0x0FB0_0FF0 == 0x0100_0090
}

#[must_use]
pub const fn is_multiply(op_code: u32) -> bool {
    op_code & 0x0FC0_00F0 == 0x0000_0090
}

/// Covers the PSR transfers as well as the sixteen ALU operations.
#[must_use]
pub const fn is_data_processing(op_code: u32) -> bool {
    if op_code & 0x0C00_0000 != 0 {
        return false;
    }

    // Register operand with bits 7 and 4 set is the multiply/swap/halfword space.
    if op_code & 0x0200_0090 == 0x0000_0090 {
        return false;
    }

    // TST/TEQ/CMP/CMN without S only exist as PSR transfers.
    let comparison_without_s = op_code & 0x0190_0000 == 0x0100_0000;
    !comparison_without_s || is_psr_transfer(op_code)
}

/// B and BL.
#[must_use]
pub const fn is_branch(op_code: u32) -> bool {
    op_code & 0x0E00_0000 == 0x0A00_0000
}

/// LDR and STR, word or byte.
#[must_use]
pub const fn is_single_data_transfer(op_code: u32) -> bool {
    op_code & 0x0C00_0000 == 0x0400_0000 && op_code & 0x0E00_0010 != 0x0600_0010
}

/// LDM and STM.
#[must_use]
pub const fn is_block_data_transfer(op_code: u32) -> bool {
    op_code & 0x0E00_0000 == 0x0800_0000
}

#[must_use]
pub const fn is_software_interrupt(op_code: u32) -> bool {
    op_code & 0x0F00_0000 == 0x0F00_0000
}

/// The family of `op_code`, first match in [`Family::ALL`] order.
#[must_use]
pub fn classify(op_code: u32) -> Option<Family> {
    Family::ALL
        .into_iter()
        .find(|family| family.matches(op_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::Rng;

    fn matching(op_code: u32) -> Vec<Family> {
        Family::ALL
            .into_iter()
            .filter(|family| family.matches(op_code))
            .collect()
    }

    /// Words sitting right on the edges of each family's mask.
    fn boundary_corpus() -> Vec<u32> {
        let mut corpus = vec![
            0x0000_0000,
            0xFFFF_FFFF,
            0xE3A0_1005, // MOV R1,#5
            0xE92D_4010, // STMDB R13!,{R4,R14}
            0xE100_0090, // SWP R0,R0,[R0]
            0xE140_0090, // SWPB
            0xE000_0090, // MUL
            0xE020_0090, // MLA
            0xE080_0090, // UMULL
            0xE1D0_00B0, // LDRH
            0xE12F_FF11, // BX R1
            0xE10F_0000, // MRS
            0xE129_F001, // MSR
            0xE128_F002, // MSR flg
            0xE368_F20F, // MSR flg immediate
            0xE110_0001, // TST R0,R1
            0xE100_0001, // TST without S
            0xEA00_0000, // B
            0xEB00_0000, // BL
            0xE591_0000, // LDR
            0xE791_0102, // LDR register offset
            0xE7F0_00F0, // undefined
            0xEC00_0000, // coprocessor transfer
            0xEE00_0000, // coprocessor operation
            0xEF00_0000, // SWI
        ];

        // Every combination of the bits the predicates look at.
        for high in 0..16_u32 {
            for low in 0..16_u32 {
                corpus.push(0xE000_0000 | (high << 24) | (low << 4));
                corpus.push(0xE010_0000 | (high << 24) | (low << 4));
                corpus.push(0xE1A0_0000 | (high << 24) | (low << 4));
            }
        }

        corpus
    }

    #[test]
    fn families_are_disjoint() {
        for op_code in boundary_corpus() {
            let families = matching(op_code);
            assert!(families.len() <= 1, "0x{op_code:08X} matches {families:?}");
            assert_eq!(classify(op_code), families.first().copied());
        }
    }

    #[test]
    fn families_are_disjoint_for_random_words() {
        let mut rng = rand::thread_rng();
        for _ in 0..200_000 {
            let op_code = rng.gen_range(0..=u32::MAX);
            let families = matching(op_code);
            assert!(families.len() <= 1, "0x{op_code:08X} matches {families:?}");
        }
    }

    #[test]
    fn classify_known_words() {
        let cases = [
            (0xE100_0090, Some(Family::DataSwap)),
            (0xE140_0090, Some(Family::DataSwap)),
            (0xE000_0090, Some(Family::Multiply)),
            (0xE030_0291, Some(Family::Multiply)),
            (0xE3A0_1005, Some(Family::DataProcessing)),
            (0xE10F_0000, Some(Family::DataProcessing)),
            (0xE129_F001, Some(Family::DataProcessing)),
            (0xE368_F20F, Some(Family::DataProcessing)),
            (0xE1A0_0371, Some(Family::DataProcessing)),
            (0xEA00_0000, Some(Family::Branch)),
            (0x0B00_0010, Some(Family::Branch)),
            (0xE591_0000, Some(Family::SingleDataTransfer)),
            (0xE791_0102, Some(Family::SingleDataTransfer)),
            (0xE92D_4010, Some(Family::BlockDataTransfer)),
            (0xEF00_0011, Some(Family::SoftwareInterrupt)),
        ];

        for (op_code, family) in cases {
            assert_eq!(classify(op_code), family, "0x{op_code:08X}");
        }
    }

    #[test]
    fn unsupported_encodings_are_unclassified() {
        let cases = [
            0xE12F_FF11, // BX R1
            0xE080_0090, // UMULL
            0xE1D0_00B0, // LDRH
            0xE100_0001, // TST without S, not a PSR transfer
            0xE7F0_00F0, // undefined
            0xEC00_0000, // LDC/STC
            0xEE00_0000, // CDP
            0xEE00_0010, // MRC/MCR
        ];

        for op_code in cases {
            assert_eq!(classify(op_code), None, "0x{op_code:08X}");
        }
    }

    #[test]
    fn swap_is_tried_before_data_processing() {
        assert_eq!(Family::ALL[0], Family::DataSwap);
        assert_eq!(Family::ALL[1], Family::Multiply);
        assert_eq!(Family::ALL[2], Family::DataProcessing);
    }
}
