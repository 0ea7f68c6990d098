//! Top-level MIDI to DMX bridge.
//!
//! [`MidiDmxBridge`] wires a [`MidiReader`], a [`SceneEngine`] and a
//! [`Sleep`] capability together behind the small API an application
//! loop needs.

use crate::config::BridgeConfig;
use crate::dmx::{Rgb, RgbChannels, SceneEngine};
use crate::midi::{ControlChange, MidiReader};
use crate::serial::{ByteSource, Sleep};

/// MIDI Control Change in, DMX channel intensities out.
///
/// # Lifecycle
///
/// 1. [`MidiDmxBridge::new()`]: no I/O takes place.
/// 2. [`begin()`](Self::begin): one-time setup of the byte source.
/// 3. Optionally [`set_static_scene()`](Self::set_static_scene).
/// 4. Call [`listen()`](Self::listen) forever from the main loop, and
///    [`set_attenuation()`](Self::set_attenuation) /
///    `switch_to_*_scene()` whenever the controls change.
///
/// # Example
///
/// ```
/// use heapless::Deque;
/// use midi_dmx_bridge::serial::Sleep;
/// use midi_dmx_bridge::MidiDmxBridge;
///
/// struct NoSleep;
/// impl Sleep for NoSleep {
///     fn sleep(&mut self, _ms: u32) {}
/// }
///
/// let mut input: Deque<u8, 16> = Deque::new();
/// for b in [0xB0, 0x03, 0x19] {
///     input.push_back(b).unwrap();
/// }
///
/// let mut bridge = MidiDmxBridge::new(1, |ch, value| assert_eq!((ch, value), (3, 50)), input, NoSleep);
/// bridge.begin();
/// assert!(bridge.listen().is_some());
/// ```
pub struct MidiDmxBridge<S, D, F> {
    reader: MidiReader<S>,
    engine: SceneEngine<F>,
    sleep: D,
    listen_interval_ms: u32,
}

impl<S, D, F> MidiDmxBridge<S, D, F>
where
    S: ByteSource,
    D: Sleep,
    F: FnMut(u8, u8),
{
    /// Create a bridge listening on the 1-indexed MIDI `channel` with the
    /// default listen interval.
    ///
    /// # Arguments
    /// * `channel`: MIDI channel (clamped to 1–16)
    /// * `on_change`: called with `(dmx_channel, intensity)` for every
    ///   visible change
    /// * `serial`: source of raw MIDI bytes
    /// * `sleep`: pause provider for the listen loop
    pub fn new(channel: u8, on_change: F, serial: S, sleep: D) -> Self {
        Self::with_config(BridgeConfig::for_channel(channel), on_change, serial, sleep)
    }

    pub fn with_config(config: BridgeConfig, on_change: F, serial: S, sleep: D) -> Self {
        Self {
            reader: MidiReader::new(config.midi_channel, serial),
            engine: SceneEngine::new(on_change),
            sleep,
            listen_interval_ms: config.listen_interval_ms,
        }
    }

    /// One-time setup of the byte source.
    pub fn begin(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "MIDI DMX bridge listening for CC status {=u8:#x}",
            self.reader.sync_filter()
        );

        self.reader.begin();
    }

    /// Append an RGB assignment to the static scene.
    /// See [`SceneEngine::set_static_scene()`].
    pub fn set_static_scene(&mut self, channels: &RgbChannels, rgb: Rgb) {
        self.engine.set_static_scene(channels, rgb);
    }

    /// Set the global attenuation (0–1023, 1024 = unity).
    /// See [`SceneEngine::set_gain()`].
    pub fn set_attenuation(&mut self, attenuation: u16) {
        self.engine.set_gain(attenuation);
    }

    pub fn switch_to_dynamic_scene(&mut self) {
        self.engine.activate_dynamic_scene();
    }

    pub fn switch_to_static_scene(&mut self) {
        self.engine.activate_static_scene();
    }

    /// Run one polling cycle: try to read a Control Change, apply it to the
    /// dynamic scene, then sleep for the listen interval.
    ///
    /// Returns the message that was applied, if any.
    pub fn listen(&mut self) -> Option<ControlChange> {
        let cc = self.reader.read_cc();
        if let Some(cc) = cc {
            self.engine.set_midi_cc(cc.controller(), cc.value());
        }

        self.sleep.sleep(self.listen_interval_ms);
        cc
    }

    pub fn engine(&self) -> &SceneEngine<F> {
        &self.engine
    }

    pub fn reader_mut(&mut self) -> &mut MidiReader<S> {
        &mut self.reader
    }
}
