//! Elapsed-time counter for a matching round.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Running/stopped state of a round timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Running,
    Stopped,
}

/// Free-running counter with fixed tick granularity.
///
/// Elapsed time only ever grows in whole ticks and is frozen once stopped.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    tick: Duration,
    elapsed: Duration,
    carry: Duration,
    state: TimerState,
}

impl RoundTimer {
    /// Start a timer counting in `tick` increments.
    pub fn start(tick: Duration) -> Self {
        Self {
            tick: tick.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            carry: Duration::ZERO,
            state: TimerState::Running,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        if self.state == TimerState::Stopped {
            return;
        }
        self.carry += delta;
        let tick = self.tick.as_nanos();
        let whole = self.carry.as_nanos() / tick * tick;
        if whole > 0 {
            let whole = from_nanos(whole);
            self.elapsed += whole;
            self.carry -= whole;
        }
    }

    /// Stop the timer. Returns true only on the first call.
    pub fn stop(&mut self) -> bool {
        if self.state == TimerState::Stopped {
            return false;
        }
        self.state = TimerState::Stopped;
        self.carry = Duration::ZERO;
        true
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

// Never exceeds the carry it was taken from, so the seconds fit in u64.
fn from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    Duration::new(
        (nanos / NANOS_PER_SEC) as u64,
        (nanos % NANOS_PER_SEC) as u32,
    )
}

/// Format as `mm:ss:hh` (minutes wrap at one hour).
pub fn format_clock(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1000) % 60;
    let hundredths = (ms / 10) % 100;
    format!("{:02}:{:02}:{:02}", minutes, seconds, hundredths)
}

/// Format as seconds with two decimals, e.g. `12.34`.
pub fn format_seconds(elapsed: Duration) -> String {
    let hundredths = elapsed.as_millis() / 10;
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn counts_whole_ticks() {
        let mut timer = RoundTimer::start(ms(10));
        timer.advance(ms(25));
        assert_eq!(timer.elapsed(), ms(20));
        timer.advance(ms(5));
        assert_eq!(timer.elapsed(), ms(30));
    }

    #[test]
    fn large_step_keeps_every_tick() {
        // 5e9 one-millisecond ticks, more than fit in a u32.
        let mut timer = RoundTimer::start(ms(1));
        let step = Duration::from_secs(5_000_000);
        timer.advance(step);
        assert_eq!(timer.elapsed(), step);
        timer.advance(ms(3));
        assert_eq!(timer.elapsed(), step + ms(3));
    }

    #[test]
    fn frozen_after_stop() {
        let mut timer = RoundTimer::start(ms(10));
        timer.advance(ms(1234));
        assert!(timer.stop());
        assert!(!timer.stop());
        timer.advance(ms(10_000));
        assert_eq!(timer.elapsed(), ms(1230));
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(ms(0)), "00:00:00");
        assert_eq!(format_clock(ms(61_230)), "01:01:23");
        assert_eq!(format_clock(ms(3_600_000 + 5_000)), "00:05:00");
    }

    #[test]
    fn seconds_format() {
        assert_eq!(format_seconds(ms(12_340)), "12.34");
        assert_eq!(format_seconds(ms(500)), "0.50");
    }
}
