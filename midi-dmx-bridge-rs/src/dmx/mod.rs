//! DMX scene state and output.
//!
//! This module provides [`SceneEngine`], which holds two scenes and
//! decides which channel intensities reach the output callback.
//!
//! # Scenes
//!
//! - **Dynamic**: one [`DmxSlot`] per channel, indexed by channel number
//!   and updated live from MIDI. A channel has at most one value.
//! - **Static**: an append-only [`BoundedVec`](crate::vector::BoundedVec)
//!   of slots built from [`RgbChannels`] and an [`Rgb`] color. The same
//!   channel may appear several times; scene walks emit every entry in
//!   insertion order.
//!
//! Exactly one scene is active. Switching scenes blacks out every set slot
//! of the scene being left, then resends the scene being entered.
//!
//! # Gain
//!
//! Every emitted intensity is scaled by `(intensity * gain) >> 10`, where a
//! gain of [`UNITY_GAIN`](crate::constants::UNITY_GAIN) (1024) leaves it
//! unchanged.

mod rgb;
mod scene;
mod slot;

pub use rgb::{Rgb, RgbChannels};
pub use scene::{scale_value, Scene, SceneEngine};
pub use slot::{DmxSlot, DmxValue};
