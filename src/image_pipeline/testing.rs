//! Scripted collaborators shared by the unit tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::link::SerialLink;
use crate::image_pipeline::sink::{ImageSink, OutputFormat, PixelGrid};

/// Replays a fixed sequence of read results.
///
/// Once the script runs out every read returns zero bytes.
#[derive(Default)]
pub struct ScriptedLink {
    pub chunks: VecDeque<Vec<u8>>,
    pub reads: u32,
    pub written: Vec<u8>,
    pub flushes: u32,
    pub resets: u32,
    pub fail_reset: bool,
    /// Report one byte more than asked for on every read.
    pub overreport: bool,
}

impl ScriptedLink {
    pub fn with_chunks(chunks: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            chunks: chunks.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }
}

impl SerialLink for ScriptedLink {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.reads += 1;
        if self.overreport {
            return Ok(buf.len() + 1);
        }
        let Some(mut chunk) = self.chunks.pop_front() else {
            return Ok(0);
        };
        if chunk.len() > buf.len() {
            let rest = chunk.split_off(buf.len());
            self.chunks.push_front(rest);
        }
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn reset_buffers(&mut self) -> Result<()> {
        self.resets += 1;
        if self.fail_reset {
            return Err(CaptureError::DeviceUnavailable {
                port: "scripted".to_string(),
                reason: "reset refused".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Raw { path: PathBuf, len: usize },
    Image { path: PathBuf, channels: usize, format: OutputFormat, quality: u8 },
}

/// Records what would have been written instead of touching the disk.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub calls: Arc<Mutex<Vec<SinkCall>>>,
    pub should_fail: bool,
}

impl ImageSink for RecordingSink {
    fn write_raw(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if self.should_fail {
            return Err(CaptureError::OutputWriteError("Mock write error".to_string()));
        }
        self.calls.lock().unwrap().push(SinkCall::Raw {
            path: path.to_path_buf(),
            len: bytes.len(),
        });
        Ok(())
    }

    fn write_image(
        &self,
        path: &Path,
        grid: PixelGrid<'_>,
        format: OutputFormat,
        quality: u8,
    ) -> Result<()> {
        if self.should_fail {
            return Err(CaptureError::EncodeError("Mock encode error".to_string()));
        }
        self.calls.lock().unwrap().push(SinkCall::Image {
            path: path.to_path_buf(),
            channels: grid.channels(),
            format,
            quality,
        });
        Ok(())
    }
}

/// Wire bytes of a complete response.
pub fn response_bytes(mode: u8, width: u8, height: u8) -> Vec<u8> {
    let mut bytes = vec![mode, width, height];
    bytes.extend((0..width as usize * height as usize).map(|i| (i % 251) as u8));
    bytes
}
