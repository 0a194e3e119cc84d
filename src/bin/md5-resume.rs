//! md5sum-style tool that can save and resume hashing state.
//!
//! ```text
//! md5-resume [--resume STATE] [--save-state STATE] [FILE...]
//! ```

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use log::info;
use md5_resume::Md5;
use thiserror::Error;

const USAGE: &str = "usage: md5-resume [--resume STATE] [--save-state STATE] [FILE...]";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("{path}: {source}")]
    State {
        path: String,
        source: md5_resume::Error,
    },
}

#[derive(Debug, Default)]
struct Options {
    resume: Option<PathBuf>,
    save_state: Option<PathBuf>,
    inputs: Vec<String>,
}

#[derive(Debug)]
enum Command {
    Hash(Options),
    Help,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, CliError> {
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--resume" | "--save-state" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::Usage(format!("{arg} needs a path\n{USAGE}")))?;
                if arg == "--resume" {
                    options.resume = Some(value.into());
                } else {
                    options.save_state = Some(value.into());
                }
            }
            "-h" | "--help" => return Ok(Command::Help),
            _ => options.inputs.push(arg),
        }
    }
    if options.inputs.is_empty() {
        options.inputs.push("-".to_string());
    }
    if (options.resume.is_some() || options.save_state.is_some()) && options.inputs.len() > 1 {
        return Err(CliError::Usage(format!(
            "--resume and --save-state take a single input\n{USAGE}"
        )));
    }
    Ok(Command::Hash(options))
}

fn hash_input(hasher: &mut Md5, input: &str) -> Result<(), CliError> {
    let io_err = |source| CliError::Io {
        path: input.to_string(),
        source,
    };
    let mut reader: Box<dyn Read> = if input == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(File::open(input).map_err(io_err)?)
    };
    io::copy(&mut reader, hasher).map_err(io_err)?;
    Ok(())
}

/// Hashes every input, writing one `<digest>  <name>` line per input to `out`.
fn run(options: &Options, out: &mut impl Write) -> Result<(), CliError> {
    let mut hasher = match &options.resume {
        Some(path) => {
            let display = path.display().to_string();
            let record = fs::read(path).map_err(|source| CliError::Io {
                path: display.clone(),
                source,
            })?;
            let hasher = Md5::unmarshal(&record).map_err(|source| CliError::State {
                path: display,
                source,
            })?;
            info!("resuming from {} after {} bytes", path.display(), hasher.len());
            hasher
        }
        None => Md5::new(),
    };

    for input in &options.inputs {
        hash_input(&mut hasher, input)?;
        writeln!(out, "{}  {}", hex::encode(hasher.sum()), input).map_err(|source| {
            CliError::Io {
                path: "<stdout>".to_string(),
                source,
            }
        })?;
        if let Some(path) = &options.save_state {
            fs::write(path, hasher.marshal()).map_err(|source| CliError::Io {
                path: path.display().to_string(),
                source,
            })?;
            info!("saved state to {} after {} bytes", path.display(), hasher.len());
        }
        if options.resume.is_none() {
            hasher.reset();
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Hash(options)) => options,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };
    match run(&options, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("md5-resume: {err}");
            ExitCode::from(1)
        }
    }
}
