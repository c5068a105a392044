//! The read → classify → print loop.
//!
//! Every word yields exactly one output line: its disassembly, or the
//! `Unrecognized instruction 0x...` diagnostic. What happens after an
//! unrecognized word is up to [`UnknownPolicy`].

use std::io::{Read, Write};

use crate::error::{DecodeError, DisasmError};
use crate::instructions::SIZE_OF_ARM_INSTRUCTION;
use crate::opcode::disassemble;
use crate::reader::WordReader;

/// What to do once a word matches no instruction family.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum UnknownPolicy {
    /// Report it, count it and carry on with the next word.
    #[default]
    Skip,

    /// Report it and stop reading.
    Halt,
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Options {
    pub policy: UnknownPolicy,

    /// Prefix every line with the address of its word.
    pub show_offsets: bool,

    /// Address of the first word, branch targets are resolved against it.
    pub base_address: u32,
}

/// Counters for a finished run.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Summary {
    /// Whole words read from the input.
    pub words: u64,
    pub decoded: u64,
    pub unrecognized: u64,
    /// Words dropped because their line could not be allocated.
    pub skipped: u64,
    /// The run stopped early on an unrecognized word.
    pub halted: bool,
}

impl Summary {
    /// True when every word read was disassembled.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.unrecognized == 0 && self.skipped == 0
    }
}

pub struct Disassembler<R, W> {
    reader: WordReader<R>,
    out: W,
    options: Options,
    offset: u32,
}

impl<R: Read, W: Write> Disassembler<R, W> {
    pub const fn new(input: R, out: W, options: Options) -> Self {
        Self {
            reader: WordReader::new(input),
            out,
            options,
            offset: 0,
        }
    }

    /// Disassembles the whole input.
    ///
    /// # Errors
    ///
    /// Reading the input or writing the output failed. Lines written
    /// before the failure stay written.
    pub fn run(&mut self) -> Result<Summary, DisasmError> {
        let mut summary = Summary::default();

        while let Some(word) = self.reader.read_word()? {
            summary.words += 1;
            let address = self.options.base_address.wrapping_add(self.offset);
            self.offset = self.offset.wrapping_add(SIZE_OF_ARM_INSTRUCTION as u32);

            if self.record(word, address, disassemble(word, address), &mut summary)? {
                break;
            }
        }

        self.out.flush()?;

        tracing::info!(
            "{} word(s) read, {} decoded, {} unrecognized, {} skipped",
            summary.words,
            summary.decoded,
            summary.unrecognized,
            summary.skipped
        );

        Ok(summary)
    }

    /// Writes and counts the outcome for one word. Returns `true` when the
    /// run has to stop here.
    fn record(
        &mut self,
        word: u32,
        address: u32,
        decoded: Result<String, DecodeError>,
        summary: &mut Summary,
    ) -> std::io::Result<bool> {
        match decoded {
            Ok(line) => {
                self.write_line(address, &line)?;
                summary.decoded += 1;
            }
            Err(err @ DecodeError::Unrecognized { .. }) => {
                tracing::warn!("0x{address:08X}: {err}");
                self.write_line(address, &err.to_string())?;
                summary.unrecognized += 1;

                if self.options.policy == UnknownPolicy::Halt {
                    summary.halted = true;
                    return Ok(true);
                }
            }
            Err(err @ DecodeError::OutOfMemory(_)) => {
                tracing::error!("0x{address:08X}: skipping word 0x{word:08X}, {err}");
                summary.skipped += 1;
            }
        }

        Ok(false)
    }

    fn write_line(&mut self, address: u32, line: &str) -> std::io::Result<()> {
        if self.options.show_offsets {
            write!(self.out, "0x{address:08X}:\t")?;
        }
        writeln!(self.out, "{line}")
    }

    /// Gives the output sink back.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_be_bytes()).collect()
    }

    fn run(input: &[u8], options: Options) -> (String, Summary) {
        let mut disassembler = Disassembler::new(input, Vec::new(), options);
        let summary = disassembler.run().unwrap();
        let output = String::from_utf8(disassembler.into_inner()).unwrap();
        (output, summary)
    }

    #[test]
    fn one_line_per_word() {
        let input = words(&[0xE3A0_1005, 0xE92D_4010, 0xEF00_0011]);
        let (output, summary) = run(&input, Options::default());

        assert_eq!(output, "MOV R1,#5\nSTMDB R13!,{R4,R14}\nSWI =0x11\n");
        assert_eq!(
            summary,
            Summary {
                words: 3,
                decoded: 3,
                unrecognized: 0,
                skipped: 0,
                halted: false,
            }
        );
        assert!(summary.is_clean());
    }

    #[test]
    fn skip_policy_keeps_going() {
        let input = words(&[0xE3A0_1005, 0xE7F0_00F0, 0xEF00_0011]);
        let (output, summary) = run(&input, Options::default());

        assert_eq!(
            output,
            "MOV R1,#5\nUnrecognized instruction 0xe7f000f0\nSWI =0x11\n"
        );
        assert_eq!(summary.unrecognized, 1);
        assert_eq!(summary.decoded, 2);
        assert!(!summary.halted);
        assert!(!summary.is_clean());
    }

    #[test]
    fn halt_policy_stops_after_diagnostic() {
        let input = words(&[0xE3A0_1005, 0xE7F0_00F0, 0xEF00_0011]);
        let options = Options {
            policy: UnknownPolicy::Halt,
            ..Options::default()
        };
        let (output, summary) = run(&input, options);

        assert_eq!(output, "MOV R1,#5\nUnrecognized instruction 0xe7f000f0\n");
        assert_eq!(summary.words, 2);
        assert!(summary.halted);
    }

    #[test]
    fn offsets_and_branch_targets_follow_base_address() {
        let input = words(&[0xE3A0_1005, 0xEAFF_FFFD]);
        let options = Options {
            show_offsets: true,
            base_address: 0x0800_0000,
            ..Options::default()
        };
        let (output, _) = run(&input, options);

        assert_eq!(
            output,
            "0x08000000:\tMOV R1,#5\n0x08000004:\tB 0x08000000\n"
        );
    }

    #[test]
    fn allocation_failure_skips_only_that_word() {
        let mut disassembler = Disassembler::new(&[0_u8; 0][..], Vec::new(), Options::default());
        let mut summary = Summary::default();
        let out_of_memory = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();

        let outcomes = [
            (0xE3A0_1005, 0, disassemble(0xE3A0_1005, 0)),
            (0xE92D_4010, 4, Err(DecodeError::OutOfMemory(out_of_memory))),
            (0xEF00_0011, 8, disassemble(0xEF00_0011, 8)),
        ];
        for (word, address, decoded) in outcomes {
            let stop = disassembler
                .record(word, address, decoded, &mut summary)
                .unwrap();
            assert!(!stop);
        }

        let output = String::from_utf8(disassembler.into_inner()).unwrap();
        assert_eq!(output, "MOV R1,#5\nSWI =0x11\n");
        assert_eq!(summary.decoded, 2);
        assert_eq!(summary.skipped, 1);
        assert!(!summary.is_clean());
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut input = words(&[0xE3A0_1005]);
        input.extend([0xFF, 0xFF]);
        let (output, summary) = run(&input, Options::default());

        assert_eq!(output, "MOV R1,#5\n");
        assert_eq!(summary.words, 1);
    }

    #[test]
    fn empty_input() {
        let (output, summary) = run(&[], Options::default());
        assert_eq!(output, "");
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn write_errors_end_the_run() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let input = words(&[0xE3A0_1005]);
        let result = Disassembler::new(&input[..], Full, Options::default()).run();
        assert!(matches!(result, Err(DisasmError::Io(_))));
    }
}
