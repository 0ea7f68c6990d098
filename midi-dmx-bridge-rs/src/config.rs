use crate::constants::{DEFAULT_LISTEN_INTERVAL_MS, DEFAULT_MIDI_CHANNEL};

/// Settings for [`MidiDmxBridge`](crate::MidiDmxBridge).
///
/// [`BridgeConfig::default()`] listens on MIDI channel 1 and pauses 3 ms
/// after every listen cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    /// 1-indexed MIDI channel to accept Control Change messages from.
    /// Values outside 1–16 are clamped. Default: 1.
    pub midi_channel: u8,
    /// Pause after each [`listen()`](crate::MidiDmxBridge::listen) call, in
    /// milliseconds. Default: 3.
    pub listen_interval_ms: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            midi_channel: DEFAULT_MIDI_CHANNEL,
            listen_interval_ms: DEFAULT_LISTEN_INTERVAL_MS,
        }
    }
}

impl BridgeConfig {
    /// Default settings on another MIDI channel.
    pub fn for_channel(midi_channel: u8) -> Self {
        Self {
            midi_channel,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let c = BridgeConfig::default();
        assert_eq!(c.midi_channel, 1);
        assert_eq!(c.listen_interval_ms, 3);
    }

    #[test]
    fn for_channel_keeps_other_defaults() {
        let c = BridgeConfig::for_channel(10);
        assert_eq!(c.midi_channel, 10);
        assert_eq!(c.listen_interval_ms, DEFAULT_LISTEN_INTERVAL_MS);
    }
}
