//! OS signal forwarding.
//!
//! Signals arrive on a dedicated thread and are turned into surface commands:
//! SIGUSR1 exports, SIGUSR2 toggles gesture mode, SIGINT/SIGTERM shut down.

use anyhow::{Context, Result};
use log::{info, warn};
use signal_hook::consts::signal::{SIGINT, SIGTERM, SIGUSR1, SIGUSR2};
use signal_hook::iterator::Signals;
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;

use crate::surface::SurfaceCommand;

/// Maps a received signal to the command it requests.
pub fn command_for_signal(signal: i32) -> Option<SurfaceCommand> {
    match signal {
        SIGUSR1 => Some(SurfaceCommand::Export),
        SIGUSR2 => Some(SurfaceCommand::ToggleGestureMode),
        SIGINT | SIGTERM => Some(SurfaceCommand::Shutdown),
        _ => None,
    }
}

/// Registers the handled signals and spawns the forwarding thread.
pub fn spawn_signal_forwarder(
    tx: mpsc::UnboundedSender<SurfaceCommand>,
) -> Result<JoinHandle<()>> {
    let mut signals = Signals::new([SIGUSR1, SIGUSR2, SIGINT, SIGTERM])
        .context("Failed to register signal handler")?;

    // Runs until the surface queue closes; the iterator itself never ends
    let handle = thread::Builder::new()
        .name("signal-forwarder".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                let Some(command) = command_for_signal(signal) else {
                    warn!("Received unexpected signal: {}", signal);
                    continue;
                };
                info!("Received signal {} - requesting {:?}", signal, command);
                if tx.send(command).is_err() {
                    break;
                }
            }
        })
        .context("Failed to spawn signal thread")?;

    Ok(handle)
}
