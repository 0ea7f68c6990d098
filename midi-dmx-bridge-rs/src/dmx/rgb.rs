use crate::vector::BoundedVec;

/// One byte per color component, used as the intensity of a static scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// DMX channel lists that receive the red, green and blue components.
///
/// A channel may appear in more than one list (or twice in the same list).
/// Each occurrence becomes its own static scene entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbChannels {
    pub red: BoundedVec<u8>,
    pub green: BoundedVec<u8>,
    pub blue: BoundedVec<u8>,
}

impl RgbChannels {
    /// Build the three channel lists from slices.
    ///
    /// Each list holds at most 128 channels; the rest are dropped.
    pub fn new(red: &[u8], green: &[u8], blue: &[u8]) -> Self {
        Self {
            red: BoundedVec::from_slice(red),
            green: BoundedVec::from_slice(green),
            blue: BoundedVec::from_slice(blue),
        }
    }

    /// Pair each channel list with its component of `rgb`, in red, green,
    /// blue order.
    pub fn with_colors(&self, rgb: Rgb) -> [(&BoundedVec<u8>, u8); 3] {
        [
            (&self.red, rgb.red),
            (&self.green, rgb.green),
            (&self.blue, rgb.blue),
        ]
    }
}
