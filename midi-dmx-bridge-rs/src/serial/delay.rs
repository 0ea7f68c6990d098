use embedded_hal::delay::DelayNs;

use super::Sleep;

/// [`Sleep`] backed by any `embedded-hal` delay provider
/// (e.g. `embassy_time::Delay` or a SysTick delay).
pub struct DelaySleep<D> {
    delay: D,
}

impl<D: DelayNs> DelaySleep<D> {
    pub fn new(delay: D) -> Self {
        Self { delay }
    }

    pub fn into_inner(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> Sleep for DelaySleep<D> {
    fn sleep(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
