//! In-memory and file-backed dump sources.

use super::DumpSource;
use crate::utils::error::CaptureError;
use log::debug;
use std::path::Path;

/// A dump captured ahead of time.
///
/// `current` holds the dump of only the requesting goroutine. When it is not
/// provided, the full dump is served for both kinds of request.
#[derive(Debug, Clone, Default)]
pub struct StaticDump {
    all: Vec<u8>,
    current: Option<Vec<u8>>,
}

impl StaticDump {
    pub fn new(all: impl Into<Vec<u8>>) -> Self {
        Self {
            all: all.into(),
            current: None,
        }
    }

    pub fn with_current(mut self, current: impl Into<Vec<u8>>) -> Self {
        self.current = Some(current.into());
        self
    }

    /// Load a dump from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        Ok(Self::new(read_dump(path.as_ref())?))
    }

    /// Load the "requesting goroutine only" dump from disk
    pub fn with_current_file(self, path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let current = read_dump(path.as_ref())?;
        Ok(self.with_current(current))
    }
}

fn read_dump(path: &Path) -> Result<Vec<u8>, CaptureError> {
    let bytes = std::fs::read(path).map_err(|source| CaptureError::Read {
        path: path.display().to_string(),
        source,
    })?;
    debug!("Loaded {} byte dump from {}", bytes.len(), path.display());
    Ok(bytes)
}

impl DumpSource for StaticDump {
    fn stack(&self, buf: &mut [u8], all: bool) -> usize {
        let dump = match (&self.current, all) {
            (Some(current), false) => current,
            _ => &self.all,
        };
        let n = dump.len().min(buf.len());
        buf[..n].copy_from_slice(&dump[..n]);
        n
    }
}
