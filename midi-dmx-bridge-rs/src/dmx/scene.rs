use crate::constants::{ANALOG_READ_BITS, DMX_CHANNEL_COUNT, GAIN_DEAD_ZONE, MAX_MIDI_VALUE, UNITY_GAIN};
use crate::midi::ControlChange;
use crate::vector::BoundedVec;

use super::rgb::{Rgb, RgbChannels};
use super::slot::DmxSlot;

/// Which scene drives the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scene {
    /// Fixed RGB scene configured with [`SceneEngine::set_static_scene()`].
    Static,
    /// Live scene driven by incoming MIDI.
    Dynamic,
}

/// Apply a fixed-point gain: `(value * gain) >> 10`.
///
/// `gain` is expected to be at most [`UNITY_GAIN`]; the engine never
/// stores a larger one.
pub fn scale_value(value: u8, gain: u16) -> u8 {
    ((u32::from(value) * u32::from(gain)) >> ANALOG_READ_BITS) as u8
}

/// Holds the static and dynamic scenes and reports intensity changes.
///
/// Every change that becomes visible is passed to the `on_change(channel,
/// intensity)` callback, synchronously and on the caller's stack. The
/// callback must return quickly and must not call back into the engine.
///
/// # Examples
///
/// ```
/// use core::cell::Cell;
/// use midi_dmx_bridge::dmx::{DmxSlot, SceneEngine};
///
/// let last = Cell::new(None);
/// let mut engine = SceneEngine::new(|ch, value| last.set(Some((ch, value))));
///
/// engine.set_value(DmxSlot::new(3, 50));
/// assert_eq!(last.get(), Some((3, 50)));
///
/// // Same value again: suppressed.
/// last.set(None);
/// engine.set_value(DmxSlot::new(3, 50));
/// assert_eq!(last.get(), None);
/// ```
pub struct SceneEngine<F> {
    active: Scene,
    static_scene: BoundedVec<DmxSlot>,
    /// Indexed by channel number.
    dynamic_scene: [DmxSlot; DMX_CHANNEL_COUNT],
    gain: u16,
    on_change: F,
}

impl<F> SceneEngine<F>
where
    F: FnMut(u8, u8),
{
    /// Create an engine with the dynamic scene active, unity gain and both
    /// scenes empty. Nothing is emitted.
    pub fn new(on_change: F) -> Self {
        Self {
            active: Scene::Dynamic,
            static_scene: BoundedVec::new(),
            dynamic_scene: [DmxSlot::Unset; DMX_CHANNEL_COUNT],
            gain: UNITY_GAIN,
            on_change,
        }
    }

    // ── State access ─────────────────────────────────────────────────

    pub fn gain(&self) -> u16 {
        self.gain
    }

    pub fn active_scene(&self) -> Scene {
        self.active
    }

    pub fn is_dynamic_active(&self) -> bool {
        self.active == Scene::Dynamic
    }

    /// Static scene entries in insertion order.
    pub fn static_scene(&self) -> &BoundedVec<DmxSlot> {
        &self.static_scene
    }

    /// Dynamic scene, one slot per channel.
    pub fn dynamic_scene(&self) -> &[DmxSlot; DMX_CHANNEL_COUNT] {
        &self.dynamic_scene
    }

    /// Scale `value` by the current gain.
    pub fn scale(&self, value: u8) -> u8 {
        scale_value(value, self.gain)
    }

    // ── Gain ─────────────────────────────────────────────────────────

    /// Update the gain and resend the whole active scene.
    ///
    /// Requests within [`GAIN_DEAD_ZONE`] of the current gain are ignored.
    /// Accepted values are clipped to [`UNITY_GAIN`]. The resend is not
    /// deduplicated, since a new gain changes every visible channel.
    pub fn set_gain(&mut self, gain: u16) {
        if gain.abs_diff(self.gain) <= GAIN_DEAD_ZONE {
            #[cfg(feature = "defmt")]
            defmt::trace!("Gain {} within dead zone of {}, ignored", gain, self.gain);
            return;
        }

        self.gain = gain.min(UNITY_GAIN);

        #[cfg(feature = "defmt")]
        defmt::debug!("Gain set to {} (requested {})", self.gain, gain);

        self.send_scene(self.active);
    }

    // ── Dynamic scene ────────────────────────────────────────────────

    /// Store `slot` in the dynamic scene and emit it if it changed and the
    /// dynamic scene is active.
    ///
    /// Unset slots and channels above 127 are ignored. While the static
    /// scene is active the value is still stored and shows up on the next
    /// switch back.
    pub fn set_value(&mut self, slot: DmxSlot) {
        let changed = self.update_dynamic_scene(slot);
        if !(changed && self.is_dynamic_active()) {
            return;
        }

        if let DmxSlot::Set(value) = slot {
            let level = self.scale(value.intensity);
            (self.on_change)(value.channel, level);
        }
    }

    /// Convert a raw MIDI controller/value pair and apply it with
    /// [`set_value()`](Self::set_value).
    pub fn set_midi_cc(&mut self, controller: u8, value: u8) {
        self.set_value(ControlChange::new(controller, value).to_dmx());
    }

    /// Write into the dynamic scene. Returns whether the stored slot changed.
    fn update_dynamic_scene(&mut self, slot: DmxSlot) -> bool {
        match slot {
            DmxSlot::Set(value) if value.channel <= MAX_MIDI_VALUE => {
                let stored = &mut self.dynamic_scene[usize::from(value.channel)];
                let changed = *stored != slot;
                *stored = slot;
                changed
            }
            _ => false,
        }
    }

    // ── Static scene ─────────────────────────────────────────────────

    /// Append one entry per listed channel, colored with the matching
    /// component of `rgb`.
    ///
    /// Channels above 127 are skipped. Nothing is overwritten: a channel
    /// listed twice (in one call or across calls) is stored twice, and a
    /// scene walk emits both entries in insertion order. Entries beyond
    /// 128 are dropped. Nothing is emitted here, even if the static scene
    /// is active.
    pub fn set_static_scene(&mut self, channels: &RgbChannels, rgb: Rgb) {
        for (list, color) in channels.with_colors(rgb) {
            for &channel in list {
                if channel <= MAX_MIDI_VALUE {
                    self.static_scene.push_back(DmxSlot::new(channel, color));
                }
            }
        }
    }

    // ── Scene switching ──────────────────────────────────────────────

    /// Make `scene` the active scene.
    ///
    /// No-op if it already is. Otherwise every set slot of the scene being
    /// left is sent at intensity 0, then every set slot of `scene` is sent
    /// at its scaled intensity.
    pub fn switch_scene(&mut self, scene: Scene) {
        if scene == self.active {
            return;
        }

        let previous = self.active;
        self.active = scene;

        #[cfg(feature = "defmt")]
        defmt::debug!("Scene switch: {} -> {}", previous, scene);

        self.blackout_scene(previous);
        self.send_scene(scene);
    }

    /// [`switch_scene()`](Self::switch_scene) taking a flag instead of a
    /// [`Scene`].
    pub fn switch_scene_to_dynamic(&mut self, to_dynamic: bool) {
        self.switch_scene(if to_dynamic { Scene::Dynamic } else { Scene::Static });
    }

    pub fn activate_static_scene(&mut self) {
        self.switch_scene(Scene::Static);
    }

    pub fn activate_dynamic_scene(&mut self) {
        self.switch_scene(Scene::Dynamic);
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn send_scene(&mut self, scene: Scene) {
        let gain = self.gain;
        let (slots, on_change) = self.slots_and_callback(scene);
        emit(slots, on_change, |intensity| scale_value(intensity, gain));
    }

    fn blackout_scene(&mut self, scene: Scene) {
        let (slots, on_change) = self.slots_and_callback(scene);
        emit(slots, on_change, |_| 0);
    }

    fn slots_and_callback(&mut self, scene: Scene) -> (&[DmxSlot], &mut F) {
        let slots: &[DmxSlot] = match scene {
            Scene::Static => self.static_scene.as_slice(),
            Scene::Dynamic => &self.dynamic_scene,
        };
        (slots, &mut self.on_change)
    }
}

/// Send every set slot through `on_change`, in slot order.
fn emit<F>(slots: &[DmxSlot], on_change: &mut F, level: impl Fn(u8) -> u8)
where
    F: FnMut(u8, u8),
{
    for value in slots.iter().filter_map(DmxSlot::value) {
        on_change(value.channel, level(value.intensity));
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use heapless::Vec;

    type Log = RefCell<Vec<(u8, u8), 512>>;

    fn engine(log: &Log) -> SceneEngine<impl FnMut(u8, u8) + '_> {
        SceneEngine::new(move |channel, value| {
            log.borrow_mut().push((channel, value)).unwrap();
        })
    }

    fn calls(log: &Log) -> Vec<(u8, u8), 512> {
        log.borrow().clone()
    }

    fn clear(log: &Log) {
        log.borrow_mut().clear();
    }

    fn red_only(channels: &[u8]) -> RgbChannels {
        RgbChannels::new(channels, &[], &[])
    }

    // ── Initial state ────────────────────────────────────────────────

    #[test]
    fn starts_dynamic_at_unity_gain() {
        let log = Log::default();
        let e = engine(&log);
        assert_eq!(e.active_scene(), Scene::Dynamic);
        assert!(e.is_dynamic_active());
        assert_eq!(e.gain(), UNITY_GAIN);
        assert!(e.static_scene().is_empty());
        assert!(e.dynamic_scene().iter().all(|s| !s.is_set()));
        assert!(calls(&log).is_empty());
    }

    // ── Scaling ──────────────────────────────────────────────────────

    #[test]
    fn unity_gain_is_identity() {
        for value in 0..=255u8 {
            assert_eq!(scale_value(value, UNITY_GAIN), value);
        }
    }

    #[test]
    fn scale_value_fixed_point() {
        assert_eq!(scale_value(90, 512), 45);
        assert_eq!(scale_value(90, 0), 0);
        assert_eq!(scale_value(254, 1023), 253);
        assert_eq!(scale_value(128, 900), 112);
    }

    // ── set_value ────────────────────────────────────────────────────

    #[test]
    fn set_value_emits_when_dynamic_active() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::new(3, 50));
        assert_eq!(calls(&log).as_slice(), &[(3, 50)]);
        assert_eq!(e.dynamic_scene()[3], DmxSlot::new(3, 50));
    }

    #[test]
    fn identical_value_is_emitted_once() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::new(3, 50));
        e.set_value(DmxSlot::new(3, 50));
        assert_eq!(calls(&log).as_slice(), &[(3, 50)]);

        e.set_value(DmxSlot::new(3, 52));
        assert_eq!(calls(&log).as_slice(), &[(3, 50), (3, 52)]);
    }

    #[test]
    fn set_value_is_scaled_by_gain() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_gain(512);
        e.set_value(DmxSlot::new(10, 200));
        assert_eq!(calls(&log).as_slice(), &[(10, 100)]);
    }

    #[test]
    fn unset_slot_is_ignored() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::Unset);
        assert!(calls(&log).is_empty());
        assert!(e.dynamic_scene().iter().all(|s| !s.is_set()));
    }

    #[test]
    fn channel_above_127_is_ignored() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::new(128, 10));
        e.set_value(DmxSlot::new(255, 10));
        assert!(calls(&log).is_empty());
        assert!(e.dynamic_scene().iter().all(|s| !s.is_set()));
    }

    #[test]
    fn channel_127_is_accepted() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::new(127, 1));
        assert_eq!(calls(&log).as_slice(), &[(127, 1)]);
    }

    #[test]
    fn set_value_while_static_is_stored_silently() {
        let log = Log::default();
        let mut e = engine(&log);
        e.activate_static_scene();
        clear(&log);

        e.set_value(DmxSlot::new(4, 60));
        assert!(calls(&log).is_empty());
        assert_eq!(e.dynamic_scene()[4], DmxSlot::new(4, 60));

        e.activate_dynamic_scene();
        assert_eq!(calls(&log).as_slice(), &[(4, 60)]);
    }

    #[test]
    fn set_midi_cc_converts_to_dmx() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_midi_cc(0x10, 0x40);
        e.set_midi_cc(0xFF, 0xFF);
        assert_eq!(calls(&log).as_slice(), &[(16, 128), (127, 254)]);
    }

    // ── Gain ─────────────────────────────────────────────────────────

    #[test]
    fn gain_within_dead_zone_is_ignored() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::new(3, 50));
        clear(&log);

        e.set_gain(1020);
        assert_eq!(e.gain(), UNITY_GAIN);
        e.set_gain(1019);
        assert_eq!(e.gain(), UNITY_GAIN);
        assert!(calls(&log).is_empty());
    }

    #[test]
    fn gain_outside_dead_zone_resends_active_scene() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::new(9, 128));
        e.set_value(DmxSlot::new(2, 100));
        clear(&log);

        e.set_gain(900);
        assert_eq!(e.gain(), 900);
        // Ascending channel order, scaled by the new gain.
        assert_eq!(calls(&log).as_slice(), &[(2, 87), (9, 112)]);
    }

    #[test]
    fn gain_is_clipped_to_unity() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_gain(500);
        e.set_gain(5000);
        assert_eq!(e.gain(), UNITY_GAIN);
    }

    #[test]
    fn gain_resend_is_not_deduplicated() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::new(1, 100));
        clear(&log);

        e.set_gain(512);
        e.set_gain(1024);
        assert_eq!(calls(&log).as_slice(), &[(1, 50), (1, 100)]);
    }

    #[test]
    fn gain_resends_static_scene_when_static_active() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::new(1, 100));
        e.set_static_scene(&red_only(&[7]), Rgb::new(90, 0, 0));
        e.activate_static_scene();
        clear(&log);

        e.set_gain(512);
        assert_eq!(calls(&log).as_slice(), &[(7, 45)]);
    }

    #[test]
    fn dead_zone_measured_from_current_gain() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_gain(600);
        e.set_gain(605);
        assert_eq!(e.gain(), 600);
        e.set_gain(594);
        assert_eq!(e.gain(), 594);
    }

    // ── Static scene ─────────────────────────────────────────────────

    #[test]
    fn static_scene_appends_in_rgb_order() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_static_scene(&RgbChannels::new(&[1, 4], &[2], &[3]), Rgb::new(10, 20, 30));

        let stored = e.static_scene().as_slice();
        assert_eq!(
            stored,
            &[
                DmxSlot::new(1, 10),
                DmxSlot::new(4, 10),
                DmxSlot::new(2, 20),
                DmxSlot::new(3, 30),
            ]
        );
        // Setup alone never emits.
        assert!(calls(&log).is_empty());
    }

    #[test]
    fn static_scene_skips_channels_above_127() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_static_scene(&RgbChannels::new(&[1, 128, 255], &[127], &[]), Rgb::new(5, 6, 7));
        assert_eq!(
            e.static_scene().as_slice(),
            &[DmxSlot::new(1, 5), DmxSlot::new(127, 6)]
        );
    }

    #[test]
    fn static_scene_keeps_duplicate_channels() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_static_scene(&red_only(&[5]), Rgb::new(10, 0, 0));
        e.set_static_scene(&red_only(&[5]), Rgb::new(20, 0, 0));
        assert_eq!(e.static_scene().len(), 2);

        e.activate_static_scene();
        assert_eq!(calls(&log).as_slice(), &[(5, 10), (5, 20)]);
    }

    #[test]
    fn static_scene_overflow_is_dropped() {
        let log = Log::default();
        let mut e = engine(&log);
        let red: Vec<u8, 50> = (0..50).collect();
        let green: Vec<u8, 50> = (50..100).collect();
        let blue: Vec<u8, 50> = (70..120).collect();
        e.set_static_scene(&RgbChannels::new(&red, &green, &blue), Rgb::new(1, 2, 3));

        let stored = e.static_scene();
        assert_eq!(stored.len(), 128);
        assert_eq!(stored[99], DmxSlot::new(99, 2));
        assert_eq!(stored[100], DmxSlot::new(70, 3));
        assert_eq!(stored[127], DmxSlot::new(97, 3));

        e.set_static_scene(&red_only(&[1]), Rgb::new(9, 0, 0));
        assert_eq!(e.static_scene().len(), 128);
    }

    // ── Scene switching ──────────────────────────────────────────────

    #[test]
    fn switching_to_active_scene_is_noop() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::new(3, 50));
        e.set_static_scene(&red_only(&[7]), Rgb::new(90, 0, 0));
        clear(&log);

        e.switch_scene(Scene::Dynamic);
        e.switch_scene_to_dynamic(true);
        e.activate_dynamic_scene();
        assert!(calls(&log).is_empty());
        assert!(e.is_dynamic_active());
    }

    #[test]
    fn switch_to_static_blacks_out_dynamic_then_sends_static() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::new(3, 50));
        e.set_static_scene(&red_only(&[7]), Rgb::new(90, 0, 0));
        clear(&log);

        e.switch_scene_to_dynamic(false);
        assert_eq!(e.active_scene(), Scene::Static);
        assert_eq!(calls(&log).as_slice(), &[(3, 0), (7, e.scale(90))]);
    }

    #[test]
    fn switch_back_blacks_out_static_then_sends_dynamic() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_value(DmxSlot::new(3, 50));
        e.set_value(DmxSlot::new(1, 20));
        e.set_static_scene(&red_only(&[7, 7]), Rgb::new(90, 0, 0));
        e.activate_static_scene();
        clear(&log);

        e.activate_dynamic_scene();
        assert_eq!(
            calls(&log).as_slice(),
            &[(7, 0), (7, 0), (1, 20), (3, 50)]
        );
    }

    #[test]
    fn switch_uses_current_gain() {
        let log = Log::default();
        let mut e = engine(&log);
        e.set_static_scene(&red_only(&[7]), Rgb::new(200, 0, 0));
        e.set_gain(256);
        clear(&log);

        e.activate_static_scene();
        assert_eq!(calls(&log).as_slice(), &[(7, 50)]);
    }

    #[test]
    fn switch_with_empty_scenes_emits_nothing() {
        let log = Log::default();
        let mut e = engine(&log);
        e.activate_static_scene();
        e.activate_dynamic_scene();
        assert!(calls(&log).is_empty());
    }
}
