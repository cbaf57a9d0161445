mod decode;
mod info;
mod output;

use std::io::stderr;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use cryowurst::{DecoderConfig, KellerRange, TimeZone};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options controlling how sub-packets are converted to records.
#[derive(Args, Debug)]
struct DecodeOpts {
    /// Time zone for record times: utc, local, or an offset such as -07:00.
    ///
    /// Packets carry unix timestamps. Earlier processing rendered them in the local
    /// time of the processing machine, which can be reproduced with `local`.
    #[arg(long, default_value = "utc", value_parser = parse_timezone, allow_hyphen_values = true)]
    timezone: TimeZone,

    /// Lower end of the Keller pressure sensor range in bar.
    #[arg(long, default_value_t = KellerRange::CRYOWURST_2024.min_bar, allow_negative_numbers = true)]
    keller_min_bar: f64,

    /// Upper end of the Keller pressure sensor range in bar.
    #[arg(long, default_value_t = KellerRange::CRYOWURST_2024.max_bar, allow_negative_numbers = true)]
    keller_max_bar: f64,
}

impl DecodeOpts {
    fn config(&self) -> Result<DecoderConfig> {
        if self.keller_max_bar <= self.keller_min_bar {
            bail!("--keller-max-bar must be greater than --keller-min-bar");
        }
        Ok(DecoderConfig::builder()
            .timezone(self.timezone)
            .keller(KellerRange::new(self.keller_min_bar, self.keller_max_bar))
            .build())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decode cloudloop exports to a processed CSV file.
    ///
    /// The first column of every input row must be a hex encoded satellite message.
    /// Messages from instruments other than wurst units are skipped, and messages
    /// that are not valid hex are logged and skipped.
    Decode {
        #[command(flatten)]
        opts: DecodeOpts,

        /// Delete output file if it already exists
        #[arg(long, action)]
        clobber: bool,

        /// Output file path.
        #[arg(
            short,
            long,
            default_value = "satellite_data_processed.csv",
            value_name = "path"
        )]
        output: PathBuf,

        /// Input cloudloop CSV files, decoded in the order given.
        inputs: Vec<PathBuf>,
    },
    /// Show per-unit record counts and time ranges for cloudloop exports.
    Info {
        #[command(flatten)]
        opts: DecodeOpts,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: info::Format,

        /// Input cloudloop CSV files.
        inputs: Vec<PathBuf>,
    },
}

fn parse_timezone(s: &str) -> Result<TimeZone, String> {
    s.parse::<TimeZone>().map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env("CRYOWURST_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    debug!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Decode {
            opts,
            clobber,
            output,
            inputs,
        } => {
            if !clobber && output.exists() {
                bail!("{output:?} exists; use --clobber");
            }
            let config = opts.config()?;
            info!("decoding {inputs:?} to {output:?} (time zone {})", config.timezone);
            decode::decode(inputs, output, &config)
        }
        Commands::Info {
            opts,
            format,
            inputs,
        } => info::info(inputs, format, &opts.config()?),
    }
}
