use std::fmt::Display;

/// Data processing opcodes, bits 24-21.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ArmModeAluInstr {
    And = 0x0,
    Eor = 0x1,
    Sub = 0x2,
    Rsb = 0x3,
    Add = 0x4,
    Adc = 0x5,
    Sbc = 0x6,
    Rsc = 0x7,
    Tst = 0x8,
    Teq = 0x9,
    Cmp = 0xA,
    Cmn = 0xB,
    Orr = 0xC,
    Mov = 0xD,
    Bic = 0xE,
    Mvn = 0xF,
}

impl Display for ArmModeAluInstr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Eor => f.write_str("EOR"),
            Self::Sub => f.write_str("SUB"),
            Self::Rsb => f.write_str("RSB"),
            Self::Add => f.write_str("ADD"),
            Self::Adc => f.write_str("ADC"),
            Self::Sbc => f.write_str("SBC"),
            Self::Rsc => f.write_str("RSC"),
            Self::Tst => f.write_str("TST"),
            Self::Teq => f.write_str("TEQ"),
            Self::Cmp => f.write_str("CMP"),
            Self::Cmn => f.write_str("CMN"),
            Self::Orr => f.write_str("ORR"),
            Self::Mov => f.write_str("MOV"),
            Self::Bic => f.write_str("BIC"),
            Self::Mvn => f.write_str("MVN"),
        }
    }
}

/// Which operands an ALU mnemonic is written with.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum AluInstructionKind {
    /// `<op> Rn,<op2>`, only the flags are written.
    Comparison,
    /// `<op> Rd,<op2>`, Rn is ignored.
    Move,
    /// `<op> Rd,Rn,<op2>`
    Binary,
}

pub trait Kind {
    fn kind(&self) -> AluInstructionKind;
}

impl Kind for ArmModeAluInstr {
    fn kind(&self) -> AluInstructionKind {
        use ArmModeAluInstr::*;
        match &self {
            Tst | Teq | Cmp | Cmn => AluInstructionKind::Comparison,
            Mov | Mvn => AluInstructionKind::Move,
            And | Eor | Sub | Rsb | Add | Adc | Sbc | Rsc | Orr | Bic => {
                AluInstructionKind::Binary
            }
        }
    }
}

impl From<u32> for ArmModeAluInstr {
    /// Expects the opcode already shifted down, only the 4 low bits are looked at.
    fn from(alu_op_code: u32) -> Self {
        use ArmModeAluInstr::*;
        match alu_op_code & 0xF {
            0x0 => And,
            0x1 => Eor,
            0x2 => Sub,
            0x3 => Rsb,
            0x4 => Add,
            0x5 => Adc,
            0x6 => Sbc,
            0x7 => Rsc,
            0x8 => Tst,
            0x9 => Teq,
            0xA => Cmp,
            0xB => Cmn,
            0xC => Orr,
            0xD => Mov,
            0xE => Bic,
            _ => Mvn,
        }
    }
}
