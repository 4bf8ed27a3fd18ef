//! Serial link module
//!
//! Byte-stream access to the robot. The capture code only sees the
//! [`SerialLink`] trait so tests can substitute scripted links.

mod serial_link;
mod serialport_link;

#[cfg(test)]
mod tests;

pub use serial_link::SerialLink;
pub use serialport_link::{SerialPortLink, list_ports, PortSummary};
