use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tokio::sync::mpsc;

use senselpad::config::Config;
use senselpad::input::TaggedGestureDetector;
use senselpad::surface::{FusionSession, SurfaceCommand};
use senselpad::transport::{self, TransportState};
use senselpad::signals;

#[derive(Parser, Debug)]
#[command(name = "senselpad")]
#[command(version, about = "Pressure-pad drawing surface with gesture shortcuts")]
struct Cli {
    /// Record source: a device node, FIFO or file, or `-` for stdin
    #[arg(long, short = 'd', value_name = "PATH")]
    device: String,

    /// Config file (defaults to ~/.config/senselpad/config.toml)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for JPEG exports (overrides the config)
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Export the drawing once more when the session ends
    #[arg(long, action = ArgAction::SetTrue)]
    export_on_exit: bool,

    /// Start with gesture mode on (records only feed gesture recognition)
    #[arg(long, action = ArgAction::SetTrue)]
    gesture_mode: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    log::info!("Configuration loaded");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to create Tokio runtime")?;

    let (tx, rx) = mpsc::unbounded_channel::<SurfaceCommand>();

    let mut session = FusionSession::new(&config, tx.clone(), runtime.handle().clone())?
        .with_detector(Box::new(TaggedGestureDetector::new(
            config.protocol.delimiter,
        )))
        .with_export_on_exit(cli.export_on_exit)
        .with_gesture_mode(cli.gesture_mode);
    if let Some(dir) = cli.export_dir {
        session = session.with_export_dir(dir);
    }

    session.handle(SurfaceCommand::TransportState(TransportState::Connecting));
    let source = transport::open(&cli.device)?;
    let _reader = transport::spawn_reader(source, tx.clone())
        .context("Failed to spawn transport reader")?;
    let _signals = signals::spawn_signal_forwarder(tx)?;

    log::info!("Drawing session started");
    log::info!("Signals:");
    log::info!("  - SIGUSR1: export drawing");
    log::info!("  - SIGUSR2: toggle gesture mode");
    log::info!("  - SIGINT/SIGTERM: exit");

    runtime.block_on(session.run(rx))?;

    log::info!("Drawing session closed.");
    Ok(())
}
