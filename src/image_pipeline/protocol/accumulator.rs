use tracing::{debug, warn};

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::link::SerialLink;

/// Reads allowed per capture when nothing else is configured.
///
/// With the default 100 ms link timeout this bounds a capture to 5 s, about
/// fifty times the transfer time of a 160x120 frame at 2 Mbaud.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// Collects a known number of bytes from a link that may deliver them in
/// arbitrarily small pieces.
///
/// The attempt budget is shared by every `accumulate` call made on the same
/// accumulator, so reading a header and then its payload stays within one
/// bound.
#[derive(Debug, Clone)]
pub struct ResponseAccumulator {
    max_attempts: u32,
    attempts: u32,
}

impl ResponseAccumulator {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    /// Returns exactly `expected_len` bytes in arrival order.
    ///
    /// Each read asks only for the bytes still missing, so nothing past the
    /// target is ever consumed from the link.
    pub fn accumulate<L: SerialLink + ?Sized>(
        &mut self,
        link: &mut L,
        expected_len: usize,
    ) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; expected_len];
        let mut received = 0;

        while received < expected_len {
            if self.attempts >= self.max_attempts {
                warn!(
                    expected = expected_len,
                    received,
                    attempts = self.attempts,
                    "Read budget exhausted"
                );
                return Err(CaptureError::AcquisitionTimeout {
                    expected: expected_len,
                    received,
                    attempts: self.attempts,
                });
            }
            self.attempts += 1;

            let window = &mut buffer[received..];
            let requested = window.len();
            let n = link.read(window)?;
            if n > requested {
                return Err(CaptureError::AccumulationOverflow {
                    requested,
                    reported: n,
                });
            }

            received += n;
            debug!(received, expected = expected_len, "read {} bytes", n);
        }

        Ok(buffer)
    }
}

/// One-shot accumulation with a fresh attempt budget.
pub fn accumulate<L: SerialLink + ?Sized>(
    link: &mut L,
    expected_len: usize,
    max_attempts: u32,
) -> Result<Vec<u8>> {
    ResponseAccumulator::new(max_attempts).accumulate(link, expected_len)
}
