//! Continuous Controller frame recovery from an unframed serial stream.

use crate::constants::{CC_STATUS, MAX_MIDI_VALUE};
use crate::serial::ByteSource;

use super::ControlChange;

const MIN_MIDI_CHANNEL: u8 = 1;
const MAX_MIDI_CHANNEL: u8 = 16;

/// Map a 1-indexed MIDI channel to its 4-bit wire value, clamping to 1–16.
pub fn normalize_channel(channel: u8) -> u8 {
    channel.clamp(MIN_MIDI_CHANNEL, MAX_MIDI_CHANNEL) - MIN_MIDI_CHANNEL
}

/// Status byte of a Control Change message on the given 1-indexed channel.
pub fn cc_sync_byte(channel: u8) -> u8 {
    CC_STATUS | (normalize_channel(channel) & 0x0F)
}

/// Reads Control Change messages for a single MIDI channel.
///
/// Each call to [`read_cc()`](Self::read_cc) makes at most one attempt:
///
/// 1. Skip bytes until the channel's CC status byte (the *sync byte*) is
///    found. If the input runs out first, there is no message.
/// 2. Require two more bytes to be available right now. If they are not,
///    the sync byte is lost; it is not retried when more bytes arrive.
/// 3. Read both data bytes. If either has its high bit set, there is no
///    message and both bytes are consumed.
///
/// The reader never waits for input and never re-buffers consumed bytes.
///
/// # Examples
///
/// ```
/// use heapless::Deque;
/// use midi_dmx_bridge::midi::MidiReader;
///
/// let mut bytes: Deque<u8, 8> = Deque::new();
/// for b in [0x42, 0xB4, 0x10, 0x40] {
///     bytes.push_back(b).unwrap();
/// }
///
/// let mut reader = MidiReader::new(5, bytes);
/// let cc = reader.read_cc().unwrap();
/// assert_eq!((cc.controller(), cc.value()), (0x10, 0x40));
/// assert!(reader.read_cc().is_none());
/// ```
pub struct MidiReader<S> {
    sync_filter: u8,
    serial: S,
}

impl<S> MidiReader<S>
where
    S: ByteSource,
{
    /// Create a reader for the 1-indexed MIDI `channel` (clamped to 1–16).
    pub fn new(channel: u8, serial: S) -> Self {
        Self {
            sync_filter: cc_sync_byte(channel),
            serial,
        }
    }

    /// One-time setup of the underlying byte source.
    pub fn begin(&mut self) {
        self.serial.begin();
    }

    /// The status byte this reader synchronises on.
    pub fn sync_filter(&self) -> u8 {
        self.sync_filter
    }

    /// Attempt to read one Control Change message. See the type-level docs
    /// for the exact consumption rules.
    pub fn read_cc(&mut self) -> Option<ControlChange> {
        if !self.sync_cc() || self.serial.available() < 2 {
            return None;
        }

        // Both bytes are consumed even if the first one is invalid.
        let controller = self.read_data_byte();
        let value = self.read_data_byte();

        let cc = ControlChange::new(controller?, value?);

        #[cfg(feature = "defmt")]
        defmt::trace!("CC received after sync {=u8:#x}: {}", self.sync_filter, cc);

        Some(cc)
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    pub fn into_inner(self) -> S {
        self.serial
    }

    /// Skip input until the sync byte is consumed. Returns `false` if the
    /// input ran out first.
    fn sync_cc(&mut self) -> bool {
        while self.serial.available() > 0 {
            match self.serial.read() {
                Some(byte) if byte == self.sync_filter => return true,
                Some(_) => {}
                None => break,
            }
        }
        false
    }

    /// Read one byte and accept it only as a MIDI data byte (high bit clear).
    fn read_data_byte(&mut self) -> Option<u8> {
        let byte = self.serial.read()?;
        if byte <= MAX_MIDI_VALUE {
            Some(byte)
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Discarding invalid MIDI data byte {=u8:#x}", byte);
            None
        }
    }
}
