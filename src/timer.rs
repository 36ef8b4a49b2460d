use crate::clock::{Clock, MonotonicClock};
use std::time::{Duration, Instant};

/// An accumulator of elapsed time that can be paused and partially spent.
///
/// Reading the timer with [`Timer::elapsed()`] folds the time since the last
/// read into the accumulator; nothing else touches the clock.  Callers can
/// then spend fixed quanta of the accumulated time with
/// [`Timer::consume()`] (catch-up stepping) or drop whole multiples of a
/// period with [`Timer::clear()`] (cadence keeping) without losing the
/// fractional remainder.
#[derive(Clone, Debug)]
pub(crate) struct Timer<C = MonotonicClock> {
    clock: C,
    accumulated: Duration,
    paused: bool,
    last_sample: Instant,
}

impl<C: Clock> Timer<C> {
    pub(crate) fn with_clock(clock: C) -> Timer<C> {
        let last_sample = clock.now();
        Timer {
            clock,
            accumulated: Duration::ZERO,
            paused: false,
            last_sample,
        }
    }

    /// Sample the clock and return the accumulated time.  While paused, the
    /// sample mark still moves forwards but nothing is accumulated.
    pub(crate) fn elapsed(&mut self) -> Duration {
        let now = self.clock.now();
        if !self.paused {
            self.accumulated += now.saturating_duration_since(self.last_sample);
        }
        self.last_sample = now;
        self.accumulated
    }

    /// Stop accumulating time.  Time up to the call is kept.
    pub(crate) fn pause(&mut self) {
        self.elapsed();
        self.paused = true;
    }

    /// Start accumulating time again from now
    pub(crate) fn resume(&mut self) {
        self.elapsed();
        self.paused = false;
    }
}

impl<C> Timer<C> {
    /// Spend `amount` of the accumulated time, stopping at zero
    pub(crate) fn consume(&mut self, amount: Duration) {
        self.accumulated = self.accumulated.saturating_sub(amount);
    }

    /// Reduce the accumulated time modulo `period`.  A zero period resets the
    /// accumulator.
    pub(crate) fn clear(&mut self, period: Duration) {
        let period_nanos = period.as_nanos();
        if period_nanos == 0 {
            self.reset();
            return;
        }
        let remainder = self.accumulated.as_nanos() % period_nanos;
        // The remainder is smaller than `period`, which is itself a Duration.
        self.accumulated = u64::try_from(remainder).map_or(period, Duration::from_nanos);
    }

    pub(crate) fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use rstest::rstest;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn elapsed_accumulates_across_reads() {
        let clock = ManualClock::new();
        let mut timer = Timer::with_clock(clock.clone());
        clock.advance(ms(30));
        assert_eq!(timer.elapsed(), ms(30));
        clock.advance(ms(12));
        assert_eq!(timer.elapsed(), ms(42));
        assert_eq!(timer.elapsed(), ms(42));
    }

    #[test]
    fn consume_keeps_fraction() {
        let clock = ManualClock::new();
        let mut timer = Timer::with_clock(clock.clone());
        clock.advance(ms(50));
        timer.elapsed();
        timer.consume(ms(16));
        timer.consume(ms(16));
        timer.consume(ms(16));
        assert_eq!(timer.elapsed(), ms(2));
    }

    #[test]
    fn consume_does_not_count_unsampled_time_twice() {
        let clock = ManualClock::new();
        let mut timer = Timer::with_clock(clock.clone());
        clock.advance(ms(20));
        assert_eq!(timer.elapsed(), ms(20));
        timer.consume(ms(20));
        clock.advance(ms(5));
        assert_eq!(timer.elapsed(), ms(5));
    }

    #[rstest]
    #[case(ms(10), ms(40))]
    #[case(ms(10), ms(10))]
    #[case(ms(0), ms(1))]
    #[case(ms(3), ms(u64::from(u32::MAX)))]
    fn consume_saturates_at_zero(#[case] advance: Duration, #[case] amount: Duration) {
        let clock = ManualClock::new();
        let mut timer = Timer::with_clock(clock.clone());
        clock.advance(advance);
        timer.elapsed();
        timer.consume(amount);
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[rstest]
    #[case(ms(50), ms(16), ms(2))]
    #[case(ms(48), ms(16), ms(0))]
    #[case(ms(7), ms(16), ms(7))]
    #[case(ms(50), ms(0), ms(0))]
    fn clear_keeps_remainder(
        #[case] advance: Duration,
        #[case] period: Duration,
        #[case] remainder: Duration,
    ) {
        let clock = ManualClock::new();
        let mut timer = Timer::with_clock(clock.clone());
        clock.advance(advance);
        timer.elapsed();
        timer.clear(period);
        assert_eq!(timer.elapsed(), remainder);
    }

    #[test]
    fn reset_zeroes() {
        let clock = ManualClock::new();
        let mut timer = Timer::with_clock(clock.clone());
        clock.advance(ms(99));
        timer.elapsed();
        timer.reset();
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn paused_time_is_not_accumulated() {
        let clock = ManualClock::new();
        let mut timer = Timer::with_clock(clock.clone());
        clock.advance(ms(10));
        timer.pause();
        clock.advance(ms(500));
        assert_eq!(timer.elapsed(), ms(10));
        timer.resume();
        clock.advance(ms(5));
        assert_eq!(timer.elapsed(), ms(15));
    }

    #[test]
    fn pause_is_idempotent() {
        let clock = ManualClock::new();
        let mut timer = Timer::with_clock(clock.clone());
        clock.advance(ms(10));
        timer.pause();
        let frozen = timer.elapsed();
        for _ in 0..5 {
            timer.pause();
            clock.advance(ms(100));
            assert_eq!(timer.elapsed(), frozen);
        }
    }

    #[test]
    fn paused_reads_move_sample_mark() {
        let clock = ManualClock::new();
        let mut timer = Timer::with_clock(clock.clone());
        timer.pause();
        clock.advance(ms(300));
        timer.elapsed();
        timer.resume();
        clock.advance(ms(1));
        assert_eq!(timer.elapsed(), ms(1));
    }
}
