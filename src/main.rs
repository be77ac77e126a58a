// src/main.rs
//! nmea-fix - decode NMEA-0183 sentences into a merged GPS fix

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use nmea_fix::{
    config::ParserConfig,
    display::OutputFormat,
    gps::{checksum, NmeaParser},
    monitor::FixMonitor,
};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nmea-fix", version, about = "Decode NMEA-0183 sentences into a GPS fix")]
struct Cli {
    /// Config file (default: ~/.config/nmea-fix/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode sentences in order and print the merged fix
    Parse {
        #[arg(required = true)]
        sentences: Vec<String>,
        #[arg(long)]
        ignore_checksum: bool,
        #[arg(long)]
        ignore_invalid_gps: bool,
        #[arg(long)]
        json: bool,
        /// Also print the fix re-encoded as $GPRMC
        #[arg(long)]
        rmc: bool,
    },
    /// Print the XOR checksum of TEXT
    Checksum {
        text: String,
        /// Include '$' and '*' in the checksum
        #[arg(long)]
        include_all: bool,
    },
    /// Decode a line stream (stdin or a file) and print the fix at EOF
    Watch {
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let result = runtime.block_on(run());
    // a stopped `watch` can leave a blocking stdin read behind; don't wait on it
    runtime.shutdown_background();
    result
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ParserConfig::load_from(path),
        None => ParserConfig::load(),
    }
    .context("loading configuration")?;

    match cli.command {
        Command::Parse {
            sentences,
            ignore_checksum,
            ignore_invalid_gps,
            json,
            rmc,
        } => {
            config.update_validation(
                config.ignore_checksum || ignore_checksum,
                config.ignore_invalid_gps_flag || ignore_invalid_gps,
            );

            let parser = NmeaParser::new();
            let mut state = config.new_state();
            let all_ok = parser.parse_all(&mut state, &sentences, config.ignore_checksum);
            config.finish(&mut state);

            println!("{}", OutputFormat::from_json_flag(json).render(&state)?);
            if rmc {
                println!("{}", state.to_gprmc());
            }
            if !all_ok {
                bail!("one or more sentences were rejected");
            }
        }

        Command::Checksum { text, include_all } => {
            let cksum = checksum::calc_xor_checksum(text.as_bytes(), include_all);
            println!("{}", checksum::format_checksum(cksum));
        }

        Command::Watch { file, json } => {
            let monitor = FixMonitor::new(config);

            let handle = monitor.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    handle.stop();
                }
            });

            let stats = match file {
                Some(path) => {
                    let f = tokio::fs::File::open(&path)
                        .await
                        .with_context(|| format!("opening {}", path.display()))?;
                    info!("Reading sentences from {}", path.display());
                    monitor.run(BufReader::new(f)).await?
                }
                None => monitor.run(BufReader::new(tokio::io::stdin())).await?,
            };

            println!("{}", OutputFormat::from_json_flag(json).render(&monitor.get_data()?)?);
            if stats.accepted == 0 && stats.rejected > 0 {
                bail!("no sentences were accepted");
            }
        }
    }

    Ok(())
}
