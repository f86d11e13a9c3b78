use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use blob_sha1sums::config::{DEFAULT_DEVICE, DEFAULT_MANIFEST, DEFAULT_VENDOR, DEFAULT_VENDOR_ROOT};
use blob_sha1sums::{Config, Manifest, Mode};

/// Update or clean SHA1 hashes in proprietary-files.txt
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Remove all SHA1 hashes
    #[arg(short, long)]
    cleanup: bool,

    /// Device name
    #[arg(long, default_value = DEFAULT_DEVICE)]
    device: String,

    /// Vendor name
    #[arg(long, default_value = DEFAULT_VENDOR)]
    vendor: String,

    /// Proprietary files list
    #[arg(long, default_value = DEFAULT_MANIFEST)]
    file: PathBuf,

    /// Root of the vendor tree the blobs are read from
    #[arg(long, default_value = DEFAULT_VENDOR_ROOT)]
    vendor_root: PathBuf,

    /// Log more (-v for a summary, -vv for every hashed blob)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            device: args.device,
            vendor: args.vendor,
            manifest: args.file,
            vendor_root: args.vendor_root,
            mode: if args.cleanup { Mode::Cleanup } else { Mode::Update },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();

    match run(&Config::from(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", fatal_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// One line, no backtrace.
fn fatal_message(e: &anyhow::Error) -> String {
    format!("Error: {:#}", e)
}

fn run(config: &Config) -> Result<()> {
    let mut manifest = Manifest::read(&config.manifest)?;

    match config.mode {
        Mode::Cleanup => {
            let stripped = manifest.cleanup();
            info!("{}: stripped {} hashes from {}", config.mode, stripped, config.manifest.display());
        }
        Mode::Update => {
            let vendor_path = config.vendor_path();
            let stats = manifest.update(&vendor_path);
            info!(
                "{}: {} hashed, {} missing, {} unreadable (blobs in {})",
                config.mode,
                stats.hashed,
                stats.missing,
                stats.failed,
                vendor_path.display()
            );
        }
    }

    manifest.write(&config.manifest)?;
    Ok(())
}
