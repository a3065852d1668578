//! # Guided Breathing Module
//!
//! Implements the 4-7-8 breathing exercise as an explicit state machine:
//!
//! ```text
//! Idle --start--> Inhale(4..1) --> Hold(7..1) --> Exhale(8..1) --> Complete
//!   ^                                                                 |
//!   +------------------------- reset (from any state) ----------------+
//! ```
//!
//! The timer itself knows nothing about wall-clock time. It advances one
//! second per [`BreathingTimer::tick`], and [`run_cycle`] drives it from a
//! [`Ticker`]. Resetting is a plain state transition: the driver checks a
//! shared flag after every wait and, when it is set, moves the timer back to
//! [`TimerState::Idle`] and stops.

use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// One counted phase of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    /// Length of the phase in whole seconds.
    #[must_use]
    pub fn seconds(self) -> u32 {
        match self {
            Phase::Inhale => 4,
            Phase::Hold => 7,
            Phase::Exhale => 8,
        }
    }

    /// Phase that follows this one, `None` after exhaling.
    #[must_use]
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Inhale => Some(Phase::Hold),
            Phase::Hold => Some(Phase::Exhale),
            Phase::Exhale => None,
        }
    }

    /// Instruction shown while the phase is counting.
    #[must_use]
    pub fn cue(self) -> &'static str {
        match self {
            Phase::Inhale => "INHALE... (Through Nose)",
            Phase::Hold => "HOLD... (Keep it in)",
            Phase::Exhale => "EXHALE... (Through Mouth)",
        }
    }
}

/// Total countdown displays in one full cycle.
pub const CYCLE_SECONDS: u32 = 4 + 7 + 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Counting { phase: Phase, remaining: u32 },
    Complete,
}

/// The breathing timer state machine.
#[derive(Debug, Clone)]
pub struct BreathingTimer {
    state: TimerState,
}

impl Default for BreathingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl BreathingTimer {
    pub fn new() -> Self {
        Self { state: TimerState::Idle }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Begin a fresh cycle at Inhale(4), whatever the current state.
    pub fn start(&mut self) -> TimerState {
        self.state = TimerState::Counting {
            phase: Phase::Inhale,
            remaining: Phase::Inhale.seconds(),
        };
        debug!("Breathing cycle started");
        self.state
    }

    /// Advance by one second. Idle and Complete do not change.
    pub fn tick(&mut self) -> TimerState {
        if let TimerState::Counting { phase, remaining } = self.state {
            self.state = if remaining > 1 {
                TimerState::Counting { phase, remaining: remaining - 1 }
            } else {
                match phase.next() {
                    Some(next) => TimerState::Counting { phase: next, remaining: next.seconds() },
                    None => TimerState::Complete,
                }
            };
        }
        self.state
    }

    /// Abandon any countdown and go back to Idle.
    pub fn reset(&mut self) -> TimerState {
        if self.state != TimerState::Idle {
            debug!("Breathing timer reset from {:?}", self.state);
        }
        self.state = TimerState::Idle;
        self.state
    }
}

/// Source of one-second waits.
pub trait Ticker {
    fn wait(&mut self);
}

/// Real-time ticker that sleeps for a fixed interval.
#[derive(Debug, Clone, Copy)]
pub struct SleepTicker {
    interval: Duration,
}

impl SleepTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for SleepTicker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Ticker for SleepTicker {
    fn wait(&mut self) {
        thread::sleep(self.interval);
    }
}

/// Run one full cycle, calling `on_frame` for every state shown.
///
/// Blocks for the whole cycle. Returns [`TimerState::Complete`] when the cycle
/// finished, or [`TimerState::Idle`] when `reset` was observed (the flag is
/// cleared again before returning).
pub fn run_cycle<T, F>(
    timer: &mut BreathingTimer,
    ticker: &mut T,
    reset: &AtomicBool,
    mut on_frame: F,
) -> TimerState
where
    T: Ticker + ?Sized,
    F: FnMut(TimerState),
{
    reset.store(false, Ordering::SeqCst);
    on_frame(timer.start());

    loop {
        ticker.wait();
        if reset.swap(false, Ordering::SeqCst) {
            let state = timer.reset();
            on_frame(state);
            info!("Breathing cycle abandoned");
            return state;
        }
        let state = timer.tick();
        on_frame(state);
        if state == TimerState::Complete {
            info!("Breathing cycle complete");
            return state;
        }
    }
}
