//! Single-bit (and two-bit) fields shared by several instruction families.

use std::fmt::Display;

/// There two different kind of transfer size for single data transfers.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum ReadWriteKind {
    /// A full 32 bit word.
    #[default]
    Word,

    /// A single byte, `B` suffix.
    Byte,
}

impl From<bool> for ReadWriteKind {
    fn from(value: bool) -> Self {
        if value { Self::Byte } else { Self::Word }
    }
}

impl Display for ReadWriteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Word => Ok(()),
            Self::Byte => f.write_str("B"),
        }
    }
}

/// The L bit (20) of transfer instructions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoadStoreKind {
    Store,
    Load,
}

impl From<bool> for LoadStoreKind {
    fn from(b: bool) -> Self {
        if b { Self::Load } else { Self::Store }
    }
}

/// The P bit (24) of transfer instructions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Indexing {
    /// Add offset after transfer.
    Post,

    /// Add offset before transfer.
    Pre,
}

impl From<bool> for Indexing {
    fn from(state: bool) -> Self {
        if state { Self::Pre } else { Self::Post }
    }
}

/// The U bit (23) of transfer instructions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Offsetting {
    /// Substract the offset from base.
    Down,

    /// Add the offset to base.
    Up,
}

impl From<bool> for Offsetting {
    fn from(state: bool) -> Self {
        if state { Self::Up } else { Self::Down }
    }
}

impl Display for Offsetting {
    /// Sign written in front of a transfer offset.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Down => f.write_str("-"),
            Self::Up => Ok(()),
        }
    }
}

/// The I bit (25) of data processing instructions.
///
/// Single data transfers use the same bit with the opposite meaning,
/// callers negate it before converting.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OperandKind {
    Immediate,
    Register,
}

impl From<bool> for OperandKind {
    fn from(b: bool) -> Self {
        if b { Self::Immediate } else { Self::Register }
    }
}

/// Barrel shifter operation, bits 6-5 of a register operand.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShiftKind {
    Lsl,
    Lsr,
    Asr,
    Ror,
}

impl From<u32> for ShiftKind {
    /// Only the two low bits are looked at.
    fn from(op: u32) -> Self {
        match op & 0b11 {
            0 => Self::Lsl,
            1 => Self::Lsr,
            2 => Self::Asr,
            _ => Self::Ror,
        }
    }
}

impl Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lsl => f.write_str("LSL"),
            Self::Lsr => f.write_str("LSR"),
            Self::Asr => f.write_str("ASR"),
            Self::Ror => f.write_str("ROR"),
        }
    }
}
