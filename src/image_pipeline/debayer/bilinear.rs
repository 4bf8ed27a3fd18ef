//! Bilinear demosaicing with mirrored borders.
//!
//! Every output pixel keeps the sample its own filter measured. The two
//! missing channels are the mean of the same-channel samples in the
//! surrounding 3x3 window, which for a 2x2 Bayer layout is exactly
//! bilinear interpolation: two neighbors for red/blue on a green site, four
//! orthogonal greens on a red/blue site, four diagonals for blue on red and
//! red on blue.
//!
//! Coordinates outside the mosaic are reflected without repeating the edge
//! (`-1 -> 1`, `w -> w - 2`). Reflection by an even distance keeps the
//! filter parity, so mirrored neighbors sample the channel the pattern
//! predicts.

use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::debayer::pattern::{BayerPattern, Channel};
use crate::image_pipeline::debayer::types::RgbImageData;

/// Reconstructs an RGB image from an 8-bit mosaic.
///
/// Pure: no I/O and no shared state. Fails with
/// [`CaptureError::InvalidDimensions`] for an empty grid or a mosaic whose
/// length is not `width * height`.
#[instrument(skip(mosaic))]
pub fn demosaic(
    mosaic: &[u8],
    width: usize,
    height: usize,
    pattern: BayerPattern,
) -> Result<RgbImageData> {
    if width == 0 || height == 0 || width.checked_mul(height) != Some(mosaic.len()) {
        return Err(CaptureError::InvalidDimensions(width, height));
    }

    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let own = pattern.channel_at(x, y);
            let mut pixel = [0u8; 3];
            for channel in [Channel::Red, Channel::Green, Channel::Blue] {
                pixel[channel.index()] = if channel == own {
                    mosaic[y * width + x]
                } else {
                    interpolate(mosaic, width, height, pattern, x, y, channel)
                };
            }
            data.extend_from_slice(&pixel);
        }
    }

    debug!(width, height, "Bilinear demosaic complete");

    Ok(RgbImageData {
        width,
        height,
        data,
    })
}

fn interpolate(
    mosaic: &[u8],
    width: usize,
    height: usize,
    pattern: BayerPattern,
    x: usize,
    y: usize,
    channel: Channel,
) -> u8 {
    let mut sum = 0.0f32;
    let mut count = 0u32;

    for dy in -1isize..=1 {
        let sy = reflect(y as isize + dy, height);
        for dx in -1isize..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let sx = reflect(x as isize + dx, width);
            if pattern.channel_at(sx, sy) == channel {
                sum += f32::from(mosaic[sy * width + sx]);
                count += 1;
            }
        }
    }

    if count == 0 {
        return 0;
    }
    to_sample(sum / count as f32)
}

/// Maps a possibly out-of-range coordinate back into `0..len`.
fn reflect(i: isize, len: usize) -> usize {
    let last = len as isize - 1;
    if last == 0 {
        return 0;
    }
    let mirrored = if i < 0 {
        -i
    } else if i > last {
        2 * last - i
    } else {
        i
    };
    mirrored.clamp(0, last) as usize
}

/// Rounds and clamps an interpolated value to the 8-bit range.
pub(crate) fn to_sample(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
