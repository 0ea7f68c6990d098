//! MIDI input: Control Change parsing and conversion to DMX.
//!
//! [`MidiReader`] recovers Control Change messages for one MIDI channel from
//! a raw [`ByteSource`](crate::serial::ByteSource). Each message is a
//! [`ControlChange`] whose [`to_dmx()`](ControlChange::to_dmx) yields the
//! [`DmxSlot`](crate::dmx::DmxSlot) fed to the scene engine.
//!
//! ```text
//! wire:  [0xB0 | ch-1] [controller] [value]
//!                          │           │
//! DMX:                  channel    value × 2
//! ```

mod control_change;
mod reader;

pub use control_change::{to_dmx, ControlChange};
pub use reader::{cc_sync_byte, normalize_channel, MidiReader};
