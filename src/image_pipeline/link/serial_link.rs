use crate::image_pipeline::common::error::Result;

/// Half-duplex byte stream to the device.
pub trait SerialLink {
    /// Reads up to `buf.len()` bytes, blocking at most the link timeout.
    ///
    /// `Ok(0)` means no data arrived yet and is not an error.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    /// Drops whatever is still queued in both directions.
    fn reset_buffers(&mut self) -> Result<()>;
}

impl<L: SerialLink + ?Sized> SerialLink for &mut L {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn reset_buffers(&mut self) -> Result<()> {
        (**self).reset_buffers()
    }
}
