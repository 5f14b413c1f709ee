use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use fieldprint_core as core;
use fieldprint_core::{Config, DigestMode, HashRequest, HashService, OutputFormat};
use tracing::{debug, info};

mod logging;

#[derive(Parser)]
#[command(
    name = "fieldprint",
    version,
    about = "Poseidon (BN254) fingerprints of sensor, prediction and maintenance records"
)]
struct Cli {
    /// Output format: field (default), hex, json, all, bytes32
    #[arg(long, global = true, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Digest read-back: element (default) or bytes
    #[arg(long, global = true, value_name = "MODE")]
    digest: Option<DigestMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// machineId timestamp airTemp processTemp rotationalSpeed torque toolWear machineType
    Sensor {
        #[arg(allow_negative_numbers = true, value_name = "ARGS")]
        args: Vec<String>,
    },
    /// dataId prediction probabilityInt modelVersionHash timestamp
    Prediction {
        #[arg(allow_negative_numbers = true, value_name = "ARGS")]
        args: Vec<String>,
    },
    /// dataId prediction probability modelVersion timestamp (probability is
    /// scaled by 10000, the model label is packed like `text`)
    ModelPrediction {
        #[arg(allow_hyphen_values = true, value_name = "ARGS")]
        args: Vec<String>,
    },
    /// predictionId taskType priority timestamp
    Maintenance {
        #[arg(allow_negative_numbers = true, value_name = "ARGS")]
        args: Vec<String>,
    },
    /// n1 n2 ... nk (1 <= k <= 16)
    Hash {
        #[arg(allow_negative_numbers = true, value_name = "N")]
        args: Vec<String>,
    },
    /// airTemp processTemp rotationalSpeed torque toolWear machineType
    Commitment {
        #[arg(allow_negative_numbers = true, value_name = "ARGS")]
        args: Vec<String>,
    },
    /// Pack a label (e.g. a model version) into one field element
    Text {
        #[arg(allow_hyphen_values = true, value_name = "TEXT")]
        args: Vec<String>,
    },
    #[command(external_subcommand)]
    Other(Vec<String>),
}

impl Commands {
    fn into_parts(self) -> (String, Vec<String>) {
        match self {
            Commands::Sensor { args } => ("sensor".into(), args),
            Commands::Prediction { args } => ("prediction".into(), args),
            Commands::ModelPrediction { args } => ("model-prediction".into(), args),
            Commands::Maintenance { args } => ("maintenance".into(), args),
            Commands::Hash { args } => ("hash".into(), args),
            Commands::Commitment { args } => ("commitment".into(), args),
            Commands::Text { args } => ("text".into(), args),
            Commands::Other(mut raw) => {
                let name = if raw.is_empty() {
                    String::new()
                } else {
                    raw.remove(0)
                };
                (name, raw)
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    logging::setup_logger();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let Some(command) = cli.command else {
        println!("fieldprint {}", core::version());
        Cli::command().print_help()?;
        return Ok(ExitCode::FAILURE);
    };

    let (name, raw) = command.into_parts();
    let (args, format, digest) = split_inline_flags(raw, cli.format, cli.digest)?;
    let cfg = Config::resolve(format, digest).context("invalid FIELDPRINT_* environment")?;
    debug!(?cfg, "resolved configuration");

    let request = HashRequest::parse(&name, args.as_slice())?;
    info!(command = request.command(), "hashing");

    let service = HashService::new(cfg.digest);
    let fe = service.execute(&request)?;
    println!("{}", core::render(&fe, cfg.format)?);
    Ok(ExitCode::SUCCESS)
}

/// Commands that accept hyphenated values receive trailing `--format=` /
/// `--digest=` verbatim; pull them back out before the count check.
fn split_inline_flags(
    raw: Vec<String>,
    mut format: Option<OutputFormat>,
    mut digest: Option<DigestMode>,
) -> Result<(Vec<String>, Option<OutputFormat>, Option<DigestMode>)> {
    let mut args = Vec::with_capacity(raw.len());
    for arg in raw {
        if let Some(v) = arg.strip_prefix("--format=") {
            format = Some(v.parse()?);
        } else if let Some(v) = arg.strip_prefix("--digest=") {
            digest = Some(v.parse()?);
        } else {
            args.push(arg);
        }
    }
    Ok((args, format, digest))
}
