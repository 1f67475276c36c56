use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// Blocking delay backed by `std::thread::sleep`, for use on hosts with an operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    #[inline]
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns.into()));
    }
}

/// Waits for `duration`, split into chunks that fit the `u32` nanosecond argument of `DelayNs`.
pub(crate) fn wait(delay: &mut impl DelayNs, duration: Duration) {
    let mut remaining = duration.as_nanos();
    while remaining > 0 {
        let chunk = remaining.min(u128::from(u32::MAX));
        delay.delay_ns(chunk as u32); // fits because of min() above
        remaining -= chunk;
    }
}
