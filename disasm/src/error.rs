use std::collections::TryReserveError;
use std::io;

/// Why a single word could not be turned into a line of assembly.
///
/// Both cases only affect the word at hand, the stream goes on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Unrecognized instruction 0x{word:x}")]
    Unrecognized { word: u32 },

    #[error("out of memory while formatting instruction: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

/// Failures that end a whole disassembly run.
#[derive(Debug, thiserror::Error)]
pub enum DisasmError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
