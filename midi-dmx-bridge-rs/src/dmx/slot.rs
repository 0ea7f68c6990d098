/// A DMX channel paired with its intensity.
///
/// Range limits are applied by whoever builds the value: MIDI conversion
/// clamps the channel to 0–127, and static scene setup filters out
/// channels above 127.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmxValue {
    /// DMX channel (0–127).
    pub channel: u8,
    /// Unscaled intensity.
    pub intensity: u8,
}

/// A scene slot that is either set to a [`DmxValue`] or unset.
///
/// The dynamic scene keeps one slot per channel and most of them stay
/// [`Unset`](DmxSlot::Unset) until a controller for that channel arrives.
/// Scene walks skip unset slots entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmxSlot {
    /// Slot carries a value that is part of the scene.
    Set(DmxValue),
    /// Empty slot, never emitted.
    #[default]
    Unset,
}

impl DmxSlot {
    /// Construct a set slot. No clamping is applied here.
    pub const fn new(channel: u8, intensity: u8) -> Self {
        DmxSlot::Set(DmxValue { channel, intensity })
    }

    /// Returns `true` if this slot holds a value.
    pub fn is_set(&self) -> bool {
        matches!(self, DmxSlot::Set(_))
    }

    /// Returns the inner [`DmxValue`], or `None` if the slot is unset.
    pub fn value(&self) -> Option<DmxValue> {
        match self {
            DmxSlot::Set(value) => Some(*value),
            DmxSlot::Unset => None,
        }
    }

    /// Channel of a set slot.
    pub fn channel(&self) -> Option<u8> {
        self.value().map(|v| v.channel)
    }

    /// Intensity of a set slot.
    pub fn intensity(&self) -> Option<u8> {
        self.value().map(|v| v.intensity)
    }
}

impl From<DmxValue> for DmxSlot {
    fn from(value: DmxValue) -> Self {
        DmxSlot::Set(value)
    }
}

impl From<DmxSlot> for bool {
    fn from(slot: DmxSlot) -> Self {
        slot.is_set()
    }
}
