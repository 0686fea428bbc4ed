//! Frame pacing
//!
//! [`FramePacer`] decides when a new frame may start based on a millisecond
//! tick counter supplied by the caller. It never reads a clock itself, which
//! keeps it deterministic under test.
//!
//! The next deadline is always computed from the moment a frame is granted,
//! not from the previous deadline. A frame that overruns its period therefore
//! delays the following frame instead of triggering a burst of catch-up
//! frames; the overrun is visible through [`FramePacer::cpu_load_percent`].
//!
//! All tick arithmetic is wrapping, so the pacer keeps working when the `u32`
//! millisecond counter rolls over.

use core::num::NonZeroU16;

/// Result of polling the pacer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramePoll {
    /// A new frame starts now
    Ready,
    /// The deadline has not been reached
    Pending {
        /// Milliseconds left until the deadline
        slack: u32,
    },
}

impl FramePoll {
    /// Whether the caller should idle until the next tick instead of polling again
    ///
    /// True when more than one millisecond of slack remains.
    pub const fn should_idle(self) -> bool {
        matches!(self, Self::Pending { slack } if slack > 1)
    }

    /// Whether a new frame was granted
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Deterministic frame scheduler
#[derive(Clone, Debug)]
pub struct FramePacer {
    frame_rate: NonZeroU16,
    frame_period: u32,
    next_frame_start: Option<u32>,
    last_frame_start: u32,
    last_frame_duration: u32,
    frame_count: u32,
    pending_flush: bool,
}

impl FramePacer {
    /// Create a pacer running at `rate` frames per second
    pub fn new(rate: NonZeroU16) -> Self {
        Self {
            frame_rate: rate,
            frame_period: period_for(rate),
            next_frame_start: None,
            last_frame_start: 0,
            last_frame_duration: 0,
            frame_count: 0,
            pending_flush: false,
        }
    }

    /// Change the target frame rate
    ///
    /// Takes effect when the next deadline is computed; a frame already
    /// scheduled keeps its deadline.
    pub fn set_frame_rate(&mut self, rate: NonZeroU16) {
        self.frame_rate = rate;
        self.frame_period = period_for(rate);
        log::debug!(
            "frame rate set to {} fps ({} ms period)",
            rate,
            self.frame_period
        );
    }

    /// Poll at tick `now` (milliseconds)
    ///
    /// Completes the bookkeeping of the previously granted frame, then either
    /// grants a new frame or reports the remaining slack. Polling before the
    /// deadline has no effect beyond that bookkeeping, which runs once per
    /// granted frame.
    pub fn poll(&mut self, now: u32) -> FramePoll {
        if self.pending_flush {
            self.last_frame_duration = now.wrapping_sub(self.last_frame_start);
            self.frame_count = self.frame_count.wrapping_add(1);
            self.pending_flush = false;
        }

        if let Some(next) = self.next_frame_start {
            #[allow(clippy::cast_possible_wrap)]
            let remaining = next.wrapping_sub(now) as i32;
            if remaining > 0 {
                return FramePoll::Pending {
                    slack: remaining.unsigned_abs(),
                };
            }
        }

        self.next_frame_start = Some(now.wrapping_add(self.frame_period));
        self.last_frame_start = now;
        self.pending_flush = true;
        FramePoll::Ready
    }

    /// Duration of the last completed frame as a percentage of the period
    ///
    /// Exceeds 100 when frames overrun; not clamped.
    pub fn cpu_load_percent(&self) -> u32 {
        let load = u64::from(self.last_frame_duration) * 100 / u64::from(self.frame_period);
        u32::try_from(load).unwrap_or(u32::MAX)
    }

    /// Whether the completed frame count is a multiple of `n`
    ///
    /// Always false for `n == 0`.
    pub const fn every_n_frames(&self, n: u32) -> bool {
        n != 0 && self.frame_count % n == 0
    }

    /// Number of completed frames (wrapping)
    pub const fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Target frame rate
    pub const fn frame_rate(&self) -> NonZeroU16 {
        self.frame_rate
    }

    /// Frame period in milliseconds
    pub const fn frame_period(&self) -> u32 {
        self.frame_period
    }

    /// Duration of the last completed frame in milliseconds
    pub const fn last_frame_duration(&self) -> u32 {
        self.last_frame_duration
    }

    /// Tick at which the current frame was granted
    pub const fn last_frame_start(&self) -> u32 {
        self.last_frame_start
    }

    /// Deadline of the next frame, 0 before the first frame
    pub fn next_frame_start(&self) -> u32 {
        self.next_frame_start.unwrap_or(0)
    }

    /// Whether a granted frame is still awaiting its bookkeeping
    pub const fn is_rendering(&self) -> bool {
        self.pending_flush
    }
}

fn period_for(rate: NonZeroU16) -> u32 {
    (1000 / u32::from(rate.get())).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pacer(rate: u16) -> FramePacer {
        FramePacer::new(NonZeroU16::new(rate).unwrap())
    }

    #[test]
    fn test_period_truncates() {
        assert_eq!(pacer(60).frame_period(), 16);
        assert_eq!(pacer(30).frame_period(), 33);
        assert_eq!(pacer(1000).frame_period(), 1);
        assert_eq!(pacer(5000).frame_period(), 1);
    }

    #[test]
    fn test_set_frame_rate_updates_period() {
        let mut p = pacer(60);
        p.set_frame_rate(NonZeroU16::new(30).unwrap());
        assert_eq!(p.frame_period(), 33);
        assert_eq!(p.frame_rate().get(), 30);
    }

    #[test]
    fn test_first_poll_is_ready() {
        let mut p = pacer(60);
        assert_eq!(p.poll(1234), FramePoll::Ready);
        assert_eq!(p.last_frame_start(), 1234);
        assert_eq!(p.next_frame_start(), 1250);
        assert!(p.is_rendering());
        assert_eq!(p.frame_count(), 0);
    }

    #[test]
    fn test_polls_before_deadline_do_not_mutate() {
        let mut p = pacer(60);
        assert!(p.poll(0).is_ready());
        // first pending poll completes the frame
        assert_eq!(p.poll(4), FramePoll::Pending { slack: 12 });
        assert_eq!(p.frame_count(), 1);
        assert_eq!(p.last_frame_duration(), 4);

        for now in 5..16 {
            let poll = p.poll(now);
            assert!(!poll.is_ready());
            assert_eq!(p.frame_count(), 1);
            assert_eq!(p.last_frame_duration(), 4);
            assert_eq!(p.next_frame_start(), 16);
        }
        assert!(p.poll(16).is_ready());
    }

    #[test]
    fn test_idle_only_with_more_than_one_tick_of_slack() {
        let mut p = pacer(60);
        p.poll(0);
        assert!(p.poll(14).should_idle());
        assert!(!p.poll(15).should_idle());
        assert!(!FramePoll::Ready.should_idle());
    }

    #[test]
    fn test_next_deadline_computed_from_now() {
        let mut p = pacer(60);
        p.poll(0);
        // overrun: granted 24 ms late
        assert!(p.poll(40).is_ready());
        assert_eq!(p.last_frame_duration(), 40);
        assert_eq!(p.next_frame_start(), 56);
        assert!(!p.poll(41).is_ready());
    }

    #[test]
    fn test_cpu_load() {
        let mut p = pacer(60);
        p.poll(100);
        p.poll(116);
        assert_eq!(p.last_frame_duration(), 16);
        assert_eq!(p.cpu_load_percent(), 100);

        p.poll(148);
        assert_eq!(p.last_frame_duration(), 32);
        assert_eq!(p.cpu_load_percent(), 200);

        p.poll(152);
        assert_eq!(p.cpu_load_percent(), 25);
    }

    #[test]
    fn test_every_n_frames() {
        let mut p = pacer(1000);
        let mut results = [false; 9];
        let mut now = 0;
        for slot in &mut results {
            assert!(p.poll(now).is_ready());
            *slot = p.every_n_frames(4);
            now += 1;
        }
        assert_eq!(p.frame_count(), 8);
        for count in [0usize, 1, 2, 3, 4, 8] {
            assert_eq!(results[count], count % 4 == 0, "count {count}");
        }
        assert!(!p.every_n_frames(0));
        assert!(p.every_n_frames(1));
    }

    #[test]
    fn test_wraparound() {
        let mut p = pacer(60);
        let start = u32::MAX - 5;
        assert!(p.poll(start).is_ready());
        assert_eq!(p.next_frame_start(), 10);
        assert_eq!(p.poll(u32::MAX), FramePoll::Pending { slack: 11 });
        assert_eq!(p.last_frame_duration(), 5);
        assert!(!p.poll(3).is_ready());
        assert!(p.poll(10).is_ready());
        assert_eq!(p.last_frame_start(), 10);
    }
}
