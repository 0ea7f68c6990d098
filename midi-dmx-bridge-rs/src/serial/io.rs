//! [`ByteSource`] adapter for `embedded-io` readers.

use embedded_io::{Read, ReadReady};
use heapless::Deque;

use super::error::SourceError;
use super::ByteSource;

/// Default number of bytes buffered between the reader and the parser.
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Largest single transfer from the reader into the buffer.
const CHUNK_SIZE: usize = 16;

/// Wraps an `embedded-io` reader (for example the RX half of a buffered
/// UART) as a non-blocking [`ByteSource`].
///
/// Bytes are only read while the reader reports [`ReadReady`], so
/// [`available()`](ByteSource::available) and [`read()`](ByteSource::read)
/// never wait for the line. Drained bytes are kept in a fixed
/// `heapless::Deque` of `N` bytes; whatever does not fit stays in the
/// reader until the next poll.
///
/// # Example
///
/// ```ignore
/// let rx = BufferedUartRx::new(p.UART1, Irqs, p.PIN_5, rx_buffer, config);
/// let mut serial: IoByteSource<_> = IoByteSource::new(rx);
/// if serial.available() >= 3 {
///     let status = serial.read();
/// }
/// ```
pub struct IoByteSource<R, const N: usize = DEFAULT_BUFFER_SIZE> {
    reader: R,
    buffer: Deque<u8, N>,
}

impl<R, const N: usize> IoByteSource<R, N>
where
    R: Read + ReadReady,
{
    /// Wrap `reader`. No bytes are read until the first poll.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Deque::new(),
        }
    }

    /// Move every ready byte from the reader into the buffer.
    ///
    /// Returns the number of buffered bytes afterwards. Bytes drained
    /// before an error stay buffered.
    ///
    /// # Errors
    /// * [`SourceError::Io`] when the reader fails
    /// * [`SourceError::EndOfStream`] when the reader claims to be ready
    ///   but yields nothing
    pub fn poll(&mut self) -> Result<usize, SourceError<R::Error>> {
        let mut chunk = [0u8; CHUNK_SIZE];

        while !self.buffer.is_full() && self.reader.read_ready()? {
            let room = (N - self.buffer.len()).min(CHUNK_SIZE);
            let count = self.reader.read(&mut chunk[..room])?;
            if count == 0 {
                return Err(SourceError::EndOfStream);
            }
            for &byte in &chunk[..count] {
                // At most `room` bytes were read, so this cannot overflow.
                let _ = self.buffer.push_back(byte);
            }
        }

        Ok(self.buffer.len())
    }

    /// Bytes currently held in the buffer, without polling the reader.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Release the reader. Buffered bytes are discarded.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R, const N: usize> ByteSource for IoByteSource<R, N>
where
    R: Read + ReadReady,
{
    fn available(&mut self) -> usize {
        match self.poll() {
            Ok(count) => count,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Byte source poll failed: {}", _e);
                self.buffer.len()
            }
        }
    }

    fn read(&mut self) -> Option<u8> {
        if self.buffer.is_empty() {
            let _ = self.available();
        }
        self.buffer.pop_front()
    }
}
