use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use disasm::{DisasmError, Disassembler, Options, Summary, UnknownPolicy};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Disassembles a stream of big-endian 32 bit ARM instruction words,
/// one line per word.
#[derive(Parser, Debug)]
#[command(name = "armdis", version, about)]
struct Cli {
    /// File to read words from, standard input when missing or `-`.
    input: Option<PathBuf>,

    /// Prefix every line with the address of its word.
    #[arg(long)]
    offsets: bool,

    /// Address of the first word (hex, `0x` optional), used for offsets and branch targets.
    #[arg(long, value_parser = parse_address, default_value = "0")]
    base_address: u32,

    /// Stop at the first unrecognized word instead of skipping it.
    #[arg(long)]
    halt_on_unrecognized: bool,

    /// Write logs to this file instead of standard error.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_address(value: &str) -> Result<u32, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid address `{value}`: {e}"))
}

/// Logs go to stderr (or a file) so they never mix with the disassembly.
/// The returned guard flushes the file writer when dropped.
fn init_tracing(log_file: Option<&Path>) -> io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(File::create(path)?);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(io::stderr).init();
            Ok(None)
        }
    }
}

fn open_input(input: Option<&Path>) -> io::Result<Box<dyn Read>> {
    match input {
        Some(path) if path != Path::new("-") => Ok(Box::new(BufReader::new(File::open(path)?))),
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// 0 when every word was disassembled, 1 when some word was unrecognized
/// or skipped, 2 when reading or writing failed.
fn exit_code(result: &Result<Summary, DisasmError>) -> u8 {
    match result {
        Ok(summary) if summary.is_clean() => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_tracing(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("cannot open log file: {e}");
            return ExitCode::from(2);
        }
    };

    let input = match open_input(cli.input.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            tracing::error!("cannot open input: {e}");
            eprintln!("cannot open input: {e}");
            return ExitCode::from(2);
        }
    };

    let options = Options {
        policy: if cli.halt_on_unrecognized {
            UnknownPolicy::Halt
        } else {
            UnknownPolicy::Skip
        },
        show_offsets: cli.offsets,
        base_address: cli.base_address,
    };

    let output = BufWriter::new(io::stdout().lock());
    let result = Disassembler::new(input, output, options).run();
    match &result {
        Ok(summary) if !summary.is_clean() => eprintln!(
            "{} unrecognized and {} skipped word(s)",
            summary.unrecognized, summary.skipped
        ),
        Ok(_) => {}
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{e}");
        }
    }

    ExitCode::from(exit_code(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn addresses_are_hex() {
        assert_eq!(parse_address("0x08000000"), Ok(0x0800_0000));
        assert_eq!(parse_address("0X10"), Ok(0x10));
        assert_eq!(parse_address("ff"), Ok(0xFF));
        assert!(parse_address("0xZZ").is_err());
        assert!(parse_address("1_0000_0000").is_err());
    }

    #[test]
    fn exit_status_follows_run_outcome() {
        let clean = Summary {
            words: 2,
            decoded: 2,
            ..Summary::default()
        };
        assert_eq!(exit_code(&Ok(clean)), 0);
        assert_eq!(exit_code(&Ok(Summary::default())), 0);

        let unrecognized = Summary {
            words: 2,
            decoded: 1,
            unrecognized: 1,
            ..Summary::default()
        };
        assert_eq!(exit_code(&Ok(unrecognized)), 1);

        let skipped = Summary {
            words: 1,
            skipped: 1,
            ..Summary::default()
        };
        assert_eq!(exit_code(&Ok(skipped)), 1);

        let io = DisasmError::Io(io::Error::other("broken pipe"));
        assert_eq!(exit_code(&Err(io)), 2);
    }

    #[test]
    fn unrecognized_word_gives_non_zero_status() {
        let input = [0xE3, 0xA0, 0x10, 0x05, 0xE7, 0xF0, 0x00, 0xF0];
        let result = Disassembler::new(&input[..], Vec::new(), Options::default()).run();
        assert_eq!(exit_code(&result), 1);
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["armdis"]);
        assert_eq!(cli.input, None);
        assert_eq!(cli.base_address, 0);
        assert!(!cli.offsets);
        assert!(!cli.halt_on_unrecognized);
    }

    #[test]
    fn all_flags() {
        let cli = Cli::parse_from([
            "armdis",
            "--offsets",
            "--base-address",
            "0x100",
            "--halt-on-unrecognized",
            "--log-file",
            "run.log",
            "code.bin",
        ]);
        assert_eq!(cli.input, Some(PathBuf::from("code.bin")));
        assert_eq!(cli.base_address, 0x100);
        assert!(cli.offsets);
        assert!(cli.halt_on_unrecognized);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
    }
}
