//! Hardware capabilities consumed by the bridge.
//!
//! The bridge needs two independent things from its platform: a source of
//! incoming serial bytes ([`ByteSource`]) and a way to pause the polling
//! loop ([`Sleep`]). They are separate traits so that a board can provide
//! each from a different peripheral.
//!
//! Adapters for the `embedded-io` and `embedded-hal` ecosystems live in
//! [`IoByteSource`] and [`DelaySleep`].

mod delay;
mod error;
mod io;

pub use delay::DelaySleep;
pub use error::SourceError;
pub use io::{IoByteSource, DEFAULT_BUFFER_SIZE};

use heapless::Deque;

/// Non-blocking source of serial bytes.
pub trait ByteSource {
    /// One-time setup before the first read. Defaults to a no-op for
    /// sources that are ready at construction.
    fn begin(&mut self) {}

    /// Number of bytes that can be read right now without waiting.
    fn available(&mut self) -> usize;

    /// Next byte, or `None` if nothing is pending.
    fn read(&mut self) -> Option<u8>;
}

/// Blocking pause used between polling cycles.
pub trait Sleep {
    fn sleep(&mut self, ms: u32);
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn begin(&mut self) {
        (**self).begin();
    }

    fn available(&mut self) -> usize {
        (**self).available()
    }

    fn read(&mut self) -> Option<u8> {
        (**self).read()
    }
}

impl<S: Sleep + ?Sized> Sleep for &mut S {
    fn sleep(&mut self, ms: u32) {
        (**self).sleep(ms);
    }
}

/// In-memory FIFO, e.g. filled from a UART interrupt handler.
impl<const N: usize> ByteSource for Deque<u8, N> {
    fn available(&mut self) -> usize {
        self.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.pop_front()
    }
}
