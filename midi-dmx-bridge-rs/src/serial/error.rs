//! Error types for hardware byte sources.

use core::fmt;

/// Errors raised while draining a hardware reader into the bridge's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError<E> {
    /// Underlying reader error.
    Io(E),

    /// The reader reported ready but returned zero bytes.
    EndOfStream,
}

// Allow ergonomic `?` propagation from raw reader errors.
impl<E> From<E> for SourceError<E> {
    fn from(error: E) -> Self {
        SourceError::Io(error)
    }
}

impl<E: fmt::Debug> fmt::Display for SourceError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SourceError::Io(e) => write!(f, "serial read error: {:?}", e),
            SourceError::EndOfStream => write!(f, "serial reader reached end of stream"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: fmt::Debug> defmt::Format for SourceError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SourceError::Io(e) => defmt::write!(f, "Serial read error: {}", defmt::Debug2Format(e)),
            SourceError::EndOfStream => defmt::write!(f, "End of stream"),
        }
    }
}
