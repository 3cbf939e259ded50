//! Fade-out scheduling shared by trails and highlights.
//!
//! A fade has to traverse a number of discrete units (opacity levels, trail
//! segments) in roughly a configured duration while the engine only ticks
//! every [`MIN_DURATION`] milliseconds. [`DecayConfig`] turns the pair
//! (duration, units) into a tick interval and a number of units to consume per
//! tick. [`DecayState`] carries the per-object fade flags and timing, and the
//! [`Decay`] trait lets each object kind apply its own step.

use crate::constants::{MAX_DURATION, MIN_DURATION};

/// Derived fade timing for a (duration, divisible) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecayConfig {
    pub total_duration_ms: u32,
    pub divisible: u32,
    pub tick_interval_ms: u32,
    pub steps_per_tick: u32,
}

impl DecayConfig {
    /// Compute tick interval and steps per tick.
    ///
    /// The duration is clamped into `[MIN_DURATION, MAX_DURATION]` and a
    /// divisible of zero is treated as one.
    pub fn configure(total_duration_ms: u32, divisible: u32) -> Self {
        let divisible = divisible.max(1);
        let clamped = clamp_duration(total_duration_ms);
        let base = MIN_DURATION as f64;

        let units_of_base = clamped as f64 / base;
        let rate = units_of_base / divisible as f64;

        let (tick_interval_ms, steps_per_tick) = if rate > 1.0 {
            // slower than one unit per base tick: stretch the interval
            (units_of_base.floor() as u32 * MIN_DURATION, 1)
        } else {
            let steps = (divisible as f64 / units_of_base).round() as u32;
            (MIN_DURATION, steps.max(1))
        };

        Self {
            total_duration_ms,
            divisible,
            tick_interval_ms,
            steps_per_tick,
        }
    }

    /// Duration after clamping, the one the derivation actually used.
    pub fn effective_duration_ms(&self) -> u32 {
        clamp_duration(self.total_duration_ms)
    }

    /// Number of ticks needed to consume `divisible` units.
    pub fn ticks_to_zero(&self) -> u32 {
        self.divisible.div_ceil(self.steps_per_tick)
    }
}

#[inline]
pub fn clamp_duration(duration_ms: u32) -> u32 {
    duration_ms.clamp(MIN_DURATION, MAX_DURATION)
}

/// Per-object fade flags and timing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecayState {
    pub tracking: bool,
    pub fading: bool,
    pub config: DecayConfig,
    pub last_tick_ms: u64,
}

impl DecayState {
    pub fn new(total_duration_ms: u32, divisible: u32) -> Self {
        Self {
            tracking: false,
            fading: false,
            config: DecayConfig::configure(total_duration_ms, divisible),
            last_tick_ms: 0,
        }
    }

    /// Re-derive timing after a duration or divisible change.
    pub fn reconfigure(&mut self, total_duration_ms: u32, divisible: u32) {
        self.config = DecayConfig::configure(total_duration_ms, divisible);
    }

    #[inline]
    pub fn is_decaying(&self) -> bool {
        self.fading && !self.tracking
    }

    /// Returns true when at least one interval has elapsed since the last
    /// accepted tick, and records `now_ms` as the new reference.
    fn accept_tick(&mut self, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.last_tick_ms);
        if elapsed < u64::from(self.config.tick_interval_ms) {
            return false;
        }
        self.last_tick_ms = now_ms;
        true
    }
}

/// Capability implemented by every fading object kind.
pub trait Decay {
    fn decay_state(&self) -> &DecayState;
    fn decay_state_mut(&mut self) -> &mut DecayState;

    /// Consume `steps` units of the fade. Only called while decaying.
    fn apply_decay_step(&mut self, steps: u32);

    /// Advance the fade if the tick interval has elapsed. Calls arriving
    /// earlier than one interval after the previous accepted tick change
    /// nothing.
    fn tick(&mut self, now_ms: u64) {
        if !self.decay_state_mut().accept_tick(now_ms) {
            return;
        }
        let state = self.decay_state();
        if state.is_decaying() {
            let steps = state.config.steps_per_tick;
            self.apply_decay_step(steps);
        }
    }
}
