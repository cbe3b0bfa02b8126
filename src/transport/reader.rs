use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;

use super::{Framing, TransportSource, TransportState};
use crate::surface::SurfaceCommand;

const READ_BUFFER_SIZE: usize = 4096;

/// Splits a byte stream into complete lines.
///
/// Bytes after the last newline are kept until the next push. Carriage
/// returns are stripped and empty lines dropped.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw bytes and returns every line they completed.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let Some(last_newline) = self.pending.iter().rposition(|&b| b == b'\n') else {
            return Vec::new();
        };
        let complete: Vec<u8> = self.pending.drain(..=last_newline).collect();
        complete
            .split(|&b| b == b'\n')
            .filter_map(decode_line)
            .collect()
    }

    /// Flushes a trailing partial line at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        let tail = std::mem::take(&mut self.pending);
        decode_line(&tail)
    }
}

fn decode_line(raw: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(raw);
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

/// Starts the transport reader thread.
///
/// Sends `Connected`, then [`SurfaceCommand::Batch`]es framed as the source
/// asks for: one per read for live links, one per record for replayed
/// streams. At end of stream or on a read error it reports the `None` state
/// and asks the surface to shut down.
pub fn spawn_reader(
    source: TransportSource,
    tx: mpsc::UnboundedSender<SurfaceCommand>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("transport-reader".to_string())
        .spawn(move || {
            if tx
                .send(SurfaceCommand::TransportState(TransportState::Connected))
                .is_err()
            {
                return;
            }

            let TransportSource { reader, framing } = source;
            let delivered = match framing {
                Framing::PerRead => forward_reads(reader, &tx),
                Framing::PerLine => forward_lines(reader, &tx),
            };
            if !delivered {
                // Surface gone
                return;
            }

            let _ = tx.send(SurfaceCommand::TransportState(TransportState::None));
            let _ = tx.send(SurfaceCommand::Shutdown);
        })
}

/// Sends every read as one batch. Returns `false` once the surface is gone.
fn forward_reads(mut reader: Box<dyn Read + Send>, tx: &mpsc::UnboundedSender<SurfaceCommand>) -> bool {
    let mut splitter = LineSplitter::new();
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => {
                log::info!("Transport reached end of stream");
                break;
            }
            Ok(n) => {
                let lines = splitter.push(&buffer[..n]);
                if !lines.is_empty() && tx.send(SurfaceCommand::Batch(lines)).is_err() {
                    return false;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                log::error!("Transport read failed: {}", e);
                break;
            }
        }
    }

    match splitter.finish() {
        Some(tail) => tx.send(SurfaceCommand::Batch(vec![tail])).is_ok(),
        None => true,
    }
}

/// Sends every record as its own batch. Returns `false` once the surface is gone.
fn forward_lines(reader: Box<dyn Read + Send>, tx: &mpsc::UnboundedSender<SurfaceCommand>) -> bool {
    let mut reader = BufReader::new(reader);
    let mut raw = Vec::new();
    loop {
        raw.clear();
        match reader.read_until(b'\n', &mut raw) {
            Ok(0) => {
                log::info!("Transport reached end of stream");
                return true;
            }
            Ok(_) => {
                let Some(line) = decode_line(raw.strip_suffix(b"\n").unwrap_or(&raw)) else {
                    continue;
                };
                if tx.send(SurfaceCommand::Batch(vec![line])).is_err() {
                    return false;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                log::error!("Transport read failed: {}", e);
                return true;
            }
        }
    }
}
