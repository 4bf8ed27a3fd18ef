//! [`SerialLink`] implementation backed by the `serialport` crate.

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, SerialPort, SerialPortType};
use tracing::{debug, instrument, trace};

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::link::serial_link::SerialLink;

/// An open serial device. The port is closed when this value is dropped.
pub struct SerialPortLink {
    port_name: String,
    port: Box<dyn SerialPort>,
}

impl SerialPortLink {
    /// Opens `port_name` at `baud_rate`; every read blocks at most `timeout`.
    #[instrument(skip(timeout), fields(timeout_ms = timeout.as_millis() as u64))]
    pub fn open(port_name: &str, baud_rate: u32, timeout: Duration) -> Result<Self> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|e| CaptureError::DeviceUnavailable {
                port: port_name.to_string(),
                reason: e.to_string(),
            })?;

        debug!(port = port_name, baud_rate, "Serial port opened");

        Ok(Self {
            port_name: port_name.to_string(),
            port,
        })
    }
}

impl SerialLink for SerialPortLink {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.port.read(buf) {
            Ok(n) => {
                trace!(bytes = n, "read");
                Ok(n)
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.port.flush()?;
        Ok(())
    }

    fn reset_buffers(&mut self) -> Result<()> {
        self.port
            .clear(ClearBuffer::All)
            .map_err(|e| CaptureError::DeviceUnavailable {
                port: self.port_name.clone(),
                reason: e.to_string(),
            })
    }
}

impl Drop for SerialPortLink {
    fn drop(&mut self) {
        debug!(port = %self.port_name, "Closing serial port");
    }
}

/// A serial port visible on this host.
#[derive(Debug, Clone)]
pub struct PortSummary {
    pub name: String,
    pub description: String,
}

pub fn list_ports() -> Result<Vec<PortSummary>> {
    let ports = serialport::available_ports().map_err(|e| CaptureError::DeviceUnavailable {
        port: "*".to_string(),
        reason: e.to_string(),
    })?;

    Ok(ports
        .into_iter()
        .map(|info| {
            let description = match info.port_type {
                SerialPortType::UsbPort(usb) => format!(
                    "USB {:04x}:{:04x} {}",
                    usb.vid,
                    usb.pid,
                    usb.product.unwrap_or_default()
                ),
                SerialPortType::PciPort => "PCI".to_string(),
                SerialPortType::BluetoothPort => "Bluetooth".to_string(),
                SerialPortType::Unknown => "unknown".to_string(),
            };
            PortSummary {
                name: info.port_name,
                description,
            }
        })
        .collect())
}
