// HRPT-RS command line entry point
// Reads a CHIRP CSV export and writes an ADMS-16 import file

use anyhow::Context;
use clap::Parser;
use hrpt::formats::convert;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_USAGE: u8 = 2;

/// Ham Radio Programming Toolkit
#[derive(Debug, Parser)]
#[command(name = "hrpt", disable_version_flag = true)]
struct Args {
    /// file to read input from (default: standard input)
    #[arg(short, long)]
    input_file: Option<PathBuf>,

    /// file to write output to (default: standard output)
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// show the version information and exit
    #[arg(short = 'v', long)]
    version: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = parse_failure_code(&err);
            if err.print().is_err() {
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::from(code);
        }
    };

    if args.version {
        println!("{}", hrpt::VERSION);
        return ExitCode::from(EXIT_SUCCESS);
    }

    init_tracing();

    let result = run(&args);
    if let Err(err) = &result {
        tracing::error!("{:#}", err);
        eprintln!("hrpt: {:#}", err);
    }
    ExitCode::from(run_result_code(&result))
}

/// Exit code for arguments clap refused. `--help` lands here too and is
/// not a usage error.
fn parse_failure_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        EXIT_USAGE
    } else {
        EXIT_SUCCESS
    }
}

fn run_result_code(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(_) => EXIT_ERROR,
    }
}

/// Log to stderr, stdout may be carrying the output file
fn init_tracing() {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let format_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    // Render into memory first so a failed conversion never leaves a
    // half-written output file
    let mut rendered = Vec::new();
    let count = match &args.input_file {
        Some(path) => {
            tracing::info!("Reading {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            convert(BufReader::new(file), &mut rendered)?
        }
        None => convert(io::stdin().lock(), &mut rendered)?,
    };

    match &args.output_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            out.write_all(&rendered)?;
            out.flush()?;
            tracing::info!("Wrote {} memories to {}", count, path.display());
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(&rendered)?;
            out.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    const CHIRP_EXPORT: &str = "Location,Name,Frequency,Duplex,Offset,Tone,rToneFreq,cToneFreq,\
DtcsCode,DtcsPolarity,RxDtcsCode,CrossMode,Mode,TStep,Skip,Power,Comment,URCALL,RPT1CALL,RPT2CALL,DVCODE\r
1,REPEATER,146.940000,-,0.600000,Tone,88.5,88.5,023,NN,023,Tone->Tone,FM,5.00,,50W,,,,,\r
";

    #[test]
    fn test_parse_file_flags() {
        let args =
            Args::try_parse_from(["hrpt", "-i", "in.csv", "--output-file", "out.csv"]).unwrap();
        assert_eq!(args.input_file, Some(PathBuf::from("in.csv")));
        assert_eq!(args.output_file, Some(PathBuf::from("out.csv")));
        assert!(!args.version);

        let args = Args::try_parse_from(["hrpt"]).unwrap();
        assert!(args.input_file.is_none());
        assert!(args.output_file.is_none());
    }

    #[test]
    fn test_version_flag() {
        assert!(Args::try_parse_from(["hrpt", "-v"]).unwrap().version);
        assert!(Args::try_parse_from(["hrpt", "--version"]).unwrap().version);
    }

    #[test]
    fn test_usage_errors_exit_2() {
        let err = Args::try_parse_from(["hrpt", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(parse_failure_code(&err), EXIT_USAGE);

        let err = Args::try_parse_from(["hrpt", "-i"]).unwrap_err();
        assert_eq!(parse_failure_code(&err), EXIT_USAGE);
    }

    #[test]
    fn test_help_exits_0() {
        let err = Args::try_parse_from(["hrpt", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse_failure_code(&err), EXIT_SUCCESS);
    }

    #[test]
    fn test_run_with_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, CHIRP_EXPORT).unwrap();

        let args = Args::try_parse_from([
            "hrpt",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        let result = run(&args);
        assert_eq!(run_result_code(&result), EXIT_SUCCESS);

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().count(), 999);
        assert!(text.starts_with("1,146.94000,146.34000,0.60000,-RPT,"));
    }

    #[test]
    fn test_run_failure_exits_1_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, CHIRP_EXPORT.replace(",FM,", ",AM,")).unwrap();

        let args = Args {
            input_file: Some(input),
            output_file: Some(output.clone()),
            version: false,
        };
        let result = run(&args);
        assert_eq!(run_result_code(&result), EXIT_ERROR);
        assert!(!output.exists());

        let missing = Args {
            input_file: Some(dir.path().join("missing.csv")),
            output_file: None,
            version: false,
        };
        assert_eq!(run_result_code(&run(&missing)), EXIT_ERROR);
    }
}
