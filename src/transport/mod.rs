//! Transport adapter: the byte stream the pad's records arrive on.
//!
//! The pad (or a bridge in front of it) delivers newline-delimited ASCII
//! records. This crate reads them from a device node, FIFO or file, or from
//! stdin. A live device node delivers one sensor tick per read, so each read
//! becomes one batch; recorded streams are replayed one record per batch.

mod reader;

pub use reader::{LineSplitter, spawn_reader};

use std::fmt;
use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use thiserror::Error;

/// Transport session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    #[default]
    None,
    Listening,
    Connecting,
    Connected,
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransportState::None => "none",
            TransportState::Listening => "listening",
            TransportState::Connecting => "connecting",
            TransportState::Connected => "connected",
        };
        f.write_str(label)
    }
}

/// Errors raised while opening the transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Transport unavailable: {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// How reads from a source are grouped into batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// One batch per read: a live link delivers one sensor tick per read
    PerRead,
    /// One batch per record: files, FIFOs and pipes hand over many records
    /// per read, which are separate ticks of a recorded session
    PerLine,
}

/// An opened record source.
pub struct TransportSource {
    pub reader: Box<dyn Read + Send>,
    pub framing: Framing,
}

impl TransportSource {
    pub fn new(reader: Box<dyn Read + Send>, framing: Framing) -> Self {
        Self { reader, framing }
    }
}

/// Opens the record source named by `spec`.
///
/// `-` selects stdin; anything else is opened read-only as a path. Terminal
/// and character device nodes are framed per read, everything else per line.
pub fn open(spec: &str) -> Result<TransportSource, TransportError> {
    if spec == "-" {
        log::info!("Reading records from stdin");
        return Ok(TransportSource::new(Box::new(io::stdin()), Framing::PerLine));
    }

    let path = PathBuf::from(spec);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(source) => return Err(TransportError::Unavailable { path, source }),
    };
    let framing = framing_for(&file);
    log::info!("Reading records from {} ({:?})", path.display(), framing);
    Ok(TransportSource::new(Box::new(file), framing))
}

fn framing_for(file: &File) -> Framing {
    if file.is_terminal() || is_char_device(file) {
        Framing::PerRead
    } else {
        Framing::PerLine
    }
}

#[cfg(unix)]
fn is_char_device(file: &File) -> bool {
    use std::os::unix::fs::FileTypeExt;
    file.metadata()
        .map(|meta| meta.file_type().is_char_device())
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_char_device(_file: &File) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_display_is_lowercase() {
        assert_eq!(TransportState::Connected.to_string(), "connected");
        assert_eq!(TransportState::None.to_string(), "none");
    }

    #[test]
    fn open_missing_path_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-device");
        let err = match open(missing.to_str().unwrap()) {
            Ok(_) => panic!("opening a missing path should fail"),
            Err(err) => err,
        };
        assert!(err.to_string().contains("unavailable"));
    }

    #[cfg(unix)]
    #[test]
    fn character_devices_are_framed_per_read() {
        let source = open("/dev/null").unwrap();
        assert_eq!(source.framing, Framing::PerRead);
    }

    #[test]
    fn open_existing_file_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.txt");
        std::fs::write(&path, "1,10,20,600,0,1\n").unwrap();

        let mut source = open(path.to_str().unwrap()).unwrap();
        assert_eq!(source.framing, Framing::PerLine);
        let mut contents = String::new();
        source.reader.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "1,10,20,600,0,1\n");
    }
}
