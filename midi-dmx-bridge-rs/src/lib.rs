//! MIDI Continuous Controller to DMX scene engine.
//!
//! This crate turns MIDI Control Change messages arriving on a serial line
//! into per-channel DMX intensities, applies a global gain, and switches
//! between a fixed RGB scene and a live MIDI-driven scene. It targets small
//! microcontrollers: no heap, fixed-size buffers, no blocking reads.
//!
//! # Architecture
//!
//! ```text
//! ByteSource ──► MidiReader ──► ControlChange ──► DmxSlot ──► SceneEngine ──► on_change(ch, value)
//!                                                                ▲
//!                                          set_gain / switch_scene
//! ```
//!
//! - [`serial`]: the [`ByteSource`](serial::ByteSource) and
//!   [`Sleep`](serial::Sleep) capabilities plus adapters for
//!   `embedded-io` readers and `embedded-hal` delays.
//! - [`midi`]: [`MidiReader`](midi::MidiReader) and the MIDI to DMX
//!   conversion.
//! - [`dmx`]: [`SceneEngine`](dmx::SceneEngine) with its two scenes.
//! - [`vector`]: [`BoundedVec`](vector::BoundedVec), the fixed-ceiling
//!   array behind the static scene.
//! - [`MidiDmxBridge`]: wires everything into a single polling call.
//!
//! # Quick start
//!
//! ```ignore
//! use midi_dmx_bridge::{MidiDmxBridge, serial::{DelaySleep, IoByteSource}};
//!
//! let serial: IoByteSource<_> = IoByteSource::new(uart_rx);
//! let mut bridge = MidiDmxBridge::new(1, on_dmx_change, serial, DelaySleep::new(delay));
//! bridge.begin();
//! loop {
//!     bridge.listen();
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`**: structured logging via [`defmt`] and `defmt::Format`
//!   implementations on the public types.

#![no_std]

pub mod bridge;
pub mod config;
pub mod constants;
pub mod dmx;
pub mod midi;
pub mod serial;
pub mod vector;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use bridge::MidiDmxBridge;
pub use config::BridgeConfig;
pub use dmx::{DmxSlot, DmxValue, Rgb, RgbChannels, Scene, SceneEngine};
pub use midi::{to_dmx, ControlChange, MidiReader};
pub use serial::{ByteSource, DelaySleep, IoByteSource, Sleep, SourceError};
pub use vector::BoundedVec;
