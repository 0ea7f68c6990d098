//! Protocol and scaling constants shared by the MIDI and DMX layers.

// ---------------------------------------------------------------------------
// MIDI
// ---------------------------------------------------------------------------

/// Largest value a MIDI data byte can carry (high bit clear).
pub const MAX_MIDI_VALUE: u8 = 0x7F;

/// Status nibble of a Continuous Controller message.
/// The low nibble carries the zero-based MIDI channel.
pub const CC_STATUS: u8 = 0xB0;

/// Standard MIDI serial baud rate.
pub const MIDI_BAUD_RATE: u32 = 31_250;

/// MIDI channel used when none is configured (1-indexed).
pub const DEFAULT_MIDI_CHANNEL: u8 = 1;

// ---------------------------------------------------------------------------
// DMX
// ---------------------------------------------------------------------------

/// Number of addressable DMX channels (one per MIDI controller number).
pub const DMX_CHANNEL_COUNT: usize = MAX_MIDI_VALUE as usize + 1;

/// Factor converting a 7-bit MIDI value into the DMX intensity range.
pub const MIDI_TO_DMX_FACTOR: u8 = 0x02;

// ---------------------------------------------------------------------------
// Gain
// ---------------------------------------------------------------------------

/// Resolution of the analog attenuation input in bits.
/// Also the right shift applied after multiplying by the gain.
pub const ANALOG_READ_BITS: u8 = 10;

/// Gain value that leaves intensities unchanged.
pub const UNITY_GAIN: u16 = 1 << ANALOG_READ_BITS;

/// Gain updates closer than this to the current gain are ignored.
pub const GAIN_DEAD_ZONE: u16 = 5;

// ---------------------------------------------------------------------------
// Polling
// ---------------------------------------------------------------------------

/// Pause after each listen cycle, giving the output callback time to settle.
pub const DEFAULT_LISTEN_INTERVAL_MS: u32 = 3;
