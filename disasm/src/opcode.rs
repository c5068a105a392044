use crate::condition::Condition;
use crate::error::DecodeError;
use crate::instructions::ArmModeInstruction;

/// Enough room for the longest line the formatters can produce
/// (an alternating register list with every suffix set).
const LINE_CAPACITY: usize = 64;

/// A decoded word together with where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmModeOpcode {
    pub instruction: ArmModeInstruction,
    pub condition: Condition,
    pub raw: u32,
    pub address: u32,
}

impl ArmModeOpcode {
    /// # Errors
    ///
    /// [`DecodeError::Unrecognized`] when `raw` belongs to none of the
    /// supported instruction families.
    pub fn decode(raw: u32, address: u32) -> Result<Self, DecodeError> {
        let instruction = ArmModeInstruction::try_from(raw)?;
        Ok(Self {
            condition: instruction.condition(),
            instruction,
            raw,
            address,
        })
    }
}

impl TryFrom<u32> for ArmModeOpcode {
    type Error = DecodeError;

    fn try_from(op_code: u32) -> Result<Self, Self::Error> {
        Self::decode(op_code, 0)
    }
}

impl std::ops::Deref for ArmModeOpcode {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

impl std::fmt::Display for ArmModeOpcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.instruction.write_disassembly(f, self.address)
    }
}

/// Decodes `raw`, found at `address`, into one line of assembly.
///
/// The line buffer is reserved up front without aborting on allocation
/// failure, so a failed allocation costs a single word instead of the
/// whole process.
///
/// # Errors
///
/// [`DecodeError::Unrecognized`] for unsupported words and
/// [`DecodeError::OutOfMemory`] when the line buffer cannot be allocated.
pub fn disassemble(raw: u32, address: u32) -> Result<String, DecodeError> {
    let opcode = ArmModeOpcode::decode(raw, address)?;

    let mut line = String::new();
    line.try_reserve(LINE_CAPACITY)?;
    // Writing into a `String` cannot fail.
    let _ = opcode.instruction.write_disassembly(&mut line, address);
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mov_immediate() {
        assert_eq!(disassemble(0xE3A0_1005, 0).unwrap(), "MOV R1,#5");
    }

    #[test]
    fn push_like_store_multiple() {
        assert_eq!(disassemble(0xE92D_4010, 0).unwrap(), "STMDB R13!,{R4,R14}");
    }

    #[test]
    fn unrecognized_word() {
        let err = disassemble(0xE7F0_00F0, 0).unwrap_err();
        assert_eq!(err, DecodeError::Unrecognized { word: 0xE7F0_00F0 });
        assert_eq!(err.to_string(), "Unrecognized instruction 0xe7f000f0");
    }

    #[test]
    fn opcode_keeps_raw_word_and_address() {
        let opcode = ArmModeOpcode::decode(0x1A00_0000, 0x0800_0000).unwrap();
        assert_eq!(*opcode, 0x1A00_0000);
        assert_eq!(opcode.condition, Condition::NE);
        assert_eq!(opcode.address, 0x0800_0000);
        assert_eq!(opcode.to_string(), "BNE 0x08000008");
    }

    #[test]
    fn try_from_uses_address_zero() {
        let opcode = ArmModeOpcode::try_from(0xEA00_0000).unwrap();
        assert_eq!(opcode.to_string(), "B 0x00000008");
    }

    #[test]
    fn longest_lines_fit_reserved_capacity() {
        for raw in [0x19F5_5555, 0x19F5_AAAA, 0x0030_0090 | 0xFFF0F] {
            let line = disassemble(raw, 0).unwrap();
            assert!(line.len() <= LINE_CAPACITY, "{line}");
        }
    }
}
