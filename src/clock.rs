//! Monotonic time source

use embedded_hal::delay::DelayNs;

/// Monotonic tick source used for pacing and entropy mixing
pub trait Clock {
    /// Milliseconds since an arbitrary origin, wrapping
    fn millis(&mut self) -> u32;

    /// Microseconds since an arbitrary origin, wrapping
    fn micros(&mut self) -> u32;

    /// Block until the next millisecond tick
    ///
    /// Implementations should let the processor sleep rather than spin.
    fn idle(&mut self);
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn millis(&mut self) -> u32 {
        (**self).millis()
    }

    fn micros(&mut self) -> u32 {
        (**self).micros()
    }

    fn idle(&mut self) {
        (**self).idle();
    }
}

/// [`Clock`] built from a free-running microsecond counter and a delay provider
///
/// [`idle`](Clock::idle) waits out the rest of the current millisecond with
/// [`DelayNs::delay_us`], which most HALs implement as a busy loop. Use it
/// where sleeping is not possible (host simulators, bring-up); otherwise
/// prefer [`SleepClock`].
///
/// ```rust
/// use bandraster::{Clock, DelayClock};
/// # struct NoDelay;
/// # impl embedded_hal::delay::DelayNs for NoDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// let mut clock = DelayClock::new(|| 2_500_000u64, NoDelay);
/// assert_eq!(clock.millis(), 2_500);
/// ```
pub struct DelayClock<F, D> {
    counter: F,
    delay: D,
}

impl<F, D> DelayClock<F, D>
where
    F: FnMut() -> u64,
    D: DelayNs,
{
    /// Create a clock reading microseconds from `counter`
    pub const fn new(counter: F, delay: D) -> Self {
        Self { counter, delay }
    }

    /// Release the counter and delay provider
    pub fn release(self) -> (F, D) {
        (self.counter, self.delay)
    }
}

impl<F, D> Clock for DelayClock<F, D>
where
    F: FnMut() -> u64,
    D: DelayNs,
{
    #[allow(clippy::cast_possible_truncation)]
    fn millis(&mut self) -> u32 {
        ((self.counter)() / 1000) as u32
    }

    #[allow(clippy::cast_possible_truncation)]
    fn micros(&mut self) -> u32 {
        (self.counter)() as u32
    }

    #[allow(clippy::cast_possible_truncation)]
    fn idle(&mut self) {
        let into_tick = ((self.counter)() % 1000) as u32;
        self.delay.delay_us(1000 - into_tick);
    }
}

/// [`Clock`] that sleeps until the next timer interrupt
///
/// `wait` should suspend the core until an interrupt arrives, for example
/// `cortex_m::asm::wfi` with a 1 kHz tick interrupt driving `counter`.
///
/// ```rust
/// use bandraster::{Clock, SleepClock};
/// # fn wait_for_interrupt() {}
/// let mut clock = SleepClock::new(|| 7_000u64, wait_for_interrupt);
/// assert_eq!(clock.millis(), 7);
/// clock.idle();
/// ```
pub struct SleepClock<F, W> {
    counter: F,
    wait: W,
}

impl<F, W> SleepClock<F, W>
where
    F: FnMut() -> u64,
    W: FnMut(),
{
    /// Create a clock reading microseconds from `counter` and idling with `wait`
    pub const fn new(counter: F, wait: W) -> Self {
        Self { counter, wait }
    }

    /// Release the counter and wait hook
    pub fn release(self) -> (F, W) {
        (self.counter, self.wait)
    }
}

impl<F, W> Clock for SleepClock<F, W>
where
    F: FnMut() -> u64,
    W: FnMut(),
{
    fn millis(&mut self) -> u32 {
        ((self.counter)() / 1000) as u32
    }

    fn micros(&mut self) -> u32 {
        (self.counter)() as u32
    }

    fn idle(&mut self) {
        (self.wait)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct RecordingDelay<'a> {
        total_ns: &'a Cell<u64>,
    }

    impl DelayNs for RecordingDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns.set(self.total_ns.get() + u64::from(ns));
        }
    }

    #[test]
    fn test_counter_conversion() {
        let now = Cell::new(5_123_456u64);
        let total = Cell::new(0);
        let mut clock = DelayClock::new(|| now.get(), RecordingDelay { total_ns: &total });
        assert_eq!(clock.millis(), 5_123);
        assert_eq!(clock.micros(), 5_123_456);
    }

    #[test]
    fn test_counter_wraps_to_u32() {
        let big = u64::from(u32::MAX) + 10;
        let total = Cell::new(0);
        let mut clock = DelayClock::new(|| big, RecordingDelay { total_ns: &total });
        assert_eq!(clock.micros(), 9);
    }

    #[test]
    fn test_idle_waits_for_next_tick() {
        let total = Cell::new(0);
        let mut clock = DelayClock::new(|| 7_250u64, RecordingDelay { total_ns: &total });
        clock.idle();
        assert_eq!(total.get(), 750_000);
    }

    #[test]
    fn test_sleep_clock_idles_through_hook() {
        let waits = Cell::new(0u32);
        let mut clock = SleepClock::new(|| 42_123u64, || waits.set(waits.get() + 1));
        assert_eq!(clock.millis(), 42);
        assert_eq!(clock.micros(), 42_123);
        clock.idle();
        clock.idle();
        assert_eq!(waits.get(), 2);
    }

    #[test]
    fn test_sleep_clock_wakes_on_tick() {
        let now = Cell::new(10_400u64);
        let mut clock = SleepClock::new(|| now.get(), || now.set(now.get() / 1000 * 1000 + 1000));
        clock.idle();
        assert_eq!(clock.millis(), 11);
        assert_eq!(clock.micros(), 11_000);
    }
}
