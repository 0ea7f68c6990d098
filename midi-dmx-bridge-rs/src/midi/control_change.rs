use crate::constants::{MAX_MIDI_VALUE, MIDI_TO_DMX_FACTOR};
use crate::dmx::DmxSlot;

/// A MIDI Continuous Controller message body (controller number and value).
///
/// Both fields are clamped to the 7-bit MIDI range at construction, so a
/// `ControlChange` always converts to a valid DMX channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlChange {
    controller: u8,
    value: u8,
}

impl ControlChange {
    /// Create a control change, clamping both bytes to `0..=127`.
    pub fn new(controller: u8, value: u8) -> Self {
        Self {
            controller: controller.min(MAX_MIDI_VALUE),
            value: value.min(MAX_MIDI_VALUE),
        }
    }

    pub fn controller(&self) -> u8 {
        self.controller
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Convert into a set [`DmxSlot`]: the controller number selects the
    /// channel and the value is doubled into the `0..=254` intensity range.
    pub fn to_dmx(&self) -> DmxSlot {
        DmxSlot::new(self.controller, self.value * MIDI_TO_DMX_FACTOR)
    }
}

/// Convert a raw controller/value pair into a [`DmxSlot`].
///
/// Out-of-range bytes are clamped, never rejected.
///
/// # Examples
///
/// ```
/// use midi_dmx_bridge::midi::to_dmx;
/// use midi_dmx_bridge::dmx::DmxSlot;
///
/// assert_eq!(to_dmx(0x10, 0x40), DmxSlot::new(16, 128));
/// assert_eq!(to_dmx(0xFF, 0xFF), DmxSlot::new(127, 254));
/// ```
pub fn to_dmx(controller: u8, value: u8) -> DmxSlot {
    ControlChange::new(controller, value).to_dmx()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_midi_range() {
        let cc = ControlChange::new(200, 128);
        assert_eq!(cc.controller(), 127);
        assert_eq!(cc.value(), 127);

        let cc = ControlChange::new(5, 6);
        assert_eq!(cc.controller(), 5);
        assert_eq!(cc.value(), 6);
    }

    #[test]
    fn equality_after_clamping() {
        assert_eq!(ControlChange::new(130, 1), ControlChange::new(127, 1));
        assert_ne!(ControlChange::new(1, 1), ControlChange::new(1, 2));
    }

    #[test]
    fn to_dmx_doubles_value() {
        assert_eq!(to_dmx(0x10, 0x40), DmxSlot::new(16, 128));
        assert_eq!(to_dmx(0, 0), DmxSlot::new(0, 0));
        assert_eq!(to_dmx(127, 127), DmxSlot::new(127, 254));
    }

    #[test]
    fn to_dmx_covers_full_byte_range() {
        for controller in 0..=255u8 {
            for value in 0..=255u8 {
                let slot = to_dmx(controller, value);
                assert_eq!(slot.channel(), Some(controller.min(127)));
                assert_eq!(slot.intensity(), Some(value.min(127) * 2));
                assert_eq!(slot.intensity().map(|i| i % 2), Some(0));
            }
        }
    }
}
