pub mod check;
pub mod generate;
pub mod server;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use qsynth_core::ExperimentResult;

/// Dataset serialization for `rabi`, `decay` and `bell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

/// Where and how a generated dataset is written.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions<'a> {
    pub format: Format,
    pub pretty: bool,
    pub path: Option<&'a str>,
    pub fingerprint: bool,
}

/// Failure of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Generate(#[from] qsynth_core::Error),

    #[error("{path}: {source}")]
    Io { path: String, source: io::Error },
}

impl CommandError {
    /// 2 for rejected parameters, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Generate(e) if e.is_validation() => 2,
            _ => 1,
        }
    }

    fn io(path: &str, source: io::Error) -> Self {
        CommandError::Io {
            path: path.to_string(),
            source,
        }
    }
}

/// Unwrap a command result or print the error and exit with its code.
pub fn exit_on_error<T>(result: Result<T, CommandError>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

/// Serialize `result` in `format` to any writer.
pub fn write_result<W: Write>(
    result: &ExperimentResult,
    format: Format,
    pretty: bool,
    out: &mut W,
) -> io::Result<()> {
    match format {
        Format::Json => qsynth_core::write_json(result, out, pretty),
        Format::Csv => qsynth_core::write_csv(result, out),
    }
}

/// Write `result` to the configured file, or stdout.
pub fn emit(result: &ExperimentResult, opts: &OutputOptions<'_>) -> Result<(), CommandError> {
    match opts.path {
        Some(path) => {
            let file = File::create(path).map_err(|e| CommandError::io(path, e))?;
            let mut out = BufWriter::new(file);
            write_result(result, opts.format, opts.pretty, &mut out)
                .and_then(|()| out.flush())
                .map_err(|e| CommandError::io(path, e))
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_result(result, opts.format, opts.pretty, &mut out)
                .and_then(|()| out.flush())
                .map_err(|e| CommandError::io("<stdout>", e))
        }
    }
}

/// Write a text report to `path`.
pub fn write_text(path: &str, text: &str) -> Result<(), CommandError> {
    std::fs::write(path, text).map_err(|e| CommandError::io(path, e))
}
