//! Wire protocol module
//!
//! Request encoding, response accumulation and frame parsing for the
//! camera image exchange.

mod accumulator;
mod command;
mod frame;


pub use accumulator::{ResponseAccumulator, accumulate, DEFAULT_MAX_ATTEMPTS};
pub use command::Command;
pub use frame::{parse_frame, RawFrame, ResponseHeader, HEADER_LEN};
