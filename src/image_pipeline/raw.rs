//! Stored mosaic reading module
//!
//! Loads mosaics saved by earlier captures so they can be demosaiced and
//! re-encoded without the robot attached.

mod reader;
mod flat_reader;
pub mod types;

pub use reader::RawImageReader;
pub use flat_reader::{FlatMosaicReader, FramedMosaicReader};
pub use types::MosaicImage;
