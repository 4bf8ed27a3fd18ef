//! 2x2 color filter layouts

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::CaptureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Offset of this channel inside an interleaved RGB pixel.
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Bayer layouts, named by the top-left 2x2 cell read row by row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BayerPattern {
    Rggb,
    Bggr,
    /// Layout of the e-puck2 AR0144 output
    #[default]
    Grbg,
    Gbrg,
}

use Channel::{Blue as B, Green as G, Red as R};

impl BayerPattern {
    pub const ALL: [BayerPattern; 4] = [
        BayerPattern::Rggb,
        BayerPattern::Bggr,
        BayerPattern::Grbg,
        BayerPattern::Gbrg,
    ];

    /// Channel sampled at each `[row parity][column parity]`.
    pub const fn offsets(self) -> [[Channel; 2]; 2] {
        match self {
            BayerPattern::Rggb => [[R, G], [G, B]],
            BayerPattern::Bggr => [[B, G], [G, R]],
            BayerPattern::Grbg => [[G, R], [B, G]],
            BayerPattern::Gbrg => [[G, B], [R, G]],
        }
    }

    pub const fn channel_at(self, x: usize, y: usize) -> Channel {
        self.offsets()[y & 1][x & 1]
    }

    pub const fn name(self) -> &'static str {
        match self {
            BayerPattern::Rggb => "rggb",
            BayerPattern::Bggr => "bggr",
            BayerPattern::Grbg => "grbg",
            BayerPattern::Gbrg => "gbrg",
        }
    }
}

impl FromStr for BayerPattern {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BayerPattern::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CaptureError::UnsupportedPattern(s.to_string()))
    }
}

impl fmt::Display for BayerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
