//! Quinary-click gesture counter.

use std::time::{Duration, Instant};

/// Number of clicks that completes the gesture.
pub const QUINARY_CLICKS: u32 = 5;

/// Delay after each click at which the counter is reset.
pub const CLICK_RESET_DELAY: Duration = Duration::from_secs(2);

/// What a single click did to the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click of a burst.
    Started,
    /// Click counted, gesture not complete yet. Carries the current count.
    Counted(u32),
    /// Fifth click: the gesture fired and the counter went back to 0.
    Completed,
}

/// Counts clicks toward the five-click gesture.
///
/// Every click schedules its own reset [`CLICK_RESET_DELAY`] later. Resets
/// are never cancelled or merged: a reset scheduled by an early click still
/// clears the counter even if later clicks arrived in between. Scheduled
/// resets are kept as deadlines and applied lazily.
#[derive(Debug, Clone, Default)]
pub struct ClickCounter {
    count: u32,
    pending_resets: Vec<Instant>,
}

impl ClickCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a click at `now`.
    pub fn click(&mut self, now: Instant) -> ClickOutcome {
        self.apply_resets(now);

        self.count += 1;
        self.pending_resets.push(now + CLICK_RESET_DELAY);

        if self.count >= QUINARY_CLICKS {
            self.count = 0;
            ClickOutcome::Completed
        } else if self.count == 1 {
            ClickOutcome::Started
        } else {
            ClickOutcome::Counted(self.count)
        }
    }

    /// Current count as observed at `now`.
    ///
    /// Deadlines up to the last click were applied by [`click`](Self::click),
    /// so any deadline still stored and already due has cleared the counter.
    pub fn count(&self, now: Instant) -> u32 {
        if self.pending_resets.iter().any(|deadline| *deadline <= now) {
            0
        } else {
            self.count
        }
    }

    /// Number of resets still scheduled after `now`.
    pub fn pending_resets(&self, now: Instant) -> usize {
        self.pending_resets
            .iter()
            .filter(|deadline| **deadline > now)
            .count()
    }

    fn apply_resets(&mut self, now: Instant) {
        let before = self.pending_resets.len();
        self.pending_resets.retain(|deadline| *deadline > now);
        if self.pending_resets.len() != before {
            self.count = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_five_quick_clicks_complete() {
        let start = Instant::now();
        let mut counter = ClickCounter::new();

        assert_eq!(counter.click(start), ClickOutcome::Started);
        assert_eq!(counter.click(start + ms(100)), ClickOutcome::Counted(2));
        assert_eq!(counter.click(start + ms(200)), ClickOutcome::Counted(3));
        assert_eq!(counter.click(start + ms(300)), ClickOutcome::Counted(4));
        assert_eq!(counter.click(start + ms(400)), ClickOutcome::Completed);
        assert_eq!(counter.count(start + ms(400)), 0);
    }

    #[test]
    fn test_clicks_more_than_window_apart_never_combine() {
        let start = Instant::now();
        let mut counter = ClickCounter::new();

        for i in 0..10 {
            let outcome = counter.click(start + ms(2100 * i));
            assert_eq!(outcome, ClickOutcome::Started);
        }
    }

    #[test]
    fn test_earlier_reset_is_not_cancelled_by_later_clicks() {
        let start = Instant::now();
        let mut counter = ClickCounter::new();

        counter.click(start);
        counter.click(start + ms(1500));
        assert_eq!(counter.count(start + ms(1999)), 2);

        // The first click's reset fires at 2s even though a click came at 1.5s.
        assert_eq!(counter.count(start + ms(2000)), 0);
        assert_eq!(counter.click(start + ms(2100)), ClickOutcome::Started);
        assert_eq!(counter.count(start + ms(2100)), 1);
    }

    #[test]
    fn test_resets_stay_pending_after_completion() {
        let start = Instant::now();
        let mut counter = ClickCounter::new();

        for i in 0..5 {
            counter.click(start + ms(100 * i));
        }
        assert_eq!(counter.pending_resets(start + ms(500)), 5);

        // A reset from the previous burst clears the new burst's first click.
        assert_eq!(counter.click(start + ms(1000)), ClickOutcome::Started);
        assert_eq!(counter.count(start + ms(2050)), 0);
        assert_eq!(counter.pending_resets(start + ms(5000)), 0);
    }
}
