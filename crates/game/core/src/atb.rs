//! ATB gauges and the player's cast timer.
//!
//! Gauges advance with the simulated `dt` fed to each tick. The cast timer is
//! measured against wall-clock time instead, so a slow host frame rate never
//! stretches a cast.

use crate::config::GameConfig;

/// Converts speed and elapsed time into gauge progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtbTracker {
    base_rate: f64,
    max: f64,
}

impl AtbTracker {
    pub fn new(base_rate: f64, max: f64) -> Self {
        Self { base_rate, max }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.atb_base_rate, config.atb_max)
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Gauge gained per second: `base_rate * (speed / 10) * 10 / 60`.
    pub fn gain_per_second(&self, speed: u32) -> f64 {
        self.base_rate * (f64::from(speed) / 10.0) * 10.0 / 60.0
    }

    /// Advances `current` by `dt` seconds, clamped to `[0, max]`.
    pub fn update(&self, speed: u32, dt: f64, current: f64) -> f64 {
        let gain = self.gain_per_second(speed) * dt.max(0.0);
        (current + gain).clamp(0.0, self.max)
    }

    /// Gauge value after `time` seconds, without touching any stored state.
    pub fn predict(&self, current: f64, speed: u32, time: f64) -> f64 {
        self.update(speed, time, current)
    }

    pub fn is_ready(&self, progress: f64) -> bool {
        progress >= self.max
    }

    /// Seconds until `current` reaches the maximum. Infinite for speed 0.
    pub fn time_to_ready(&self, current: f64, speed: u32) -> f64 {
        let remaining = (self.max - current).max(0.0);
        if remaining == 0.0 {
            return 0.0;
        }
        let gain = self.gain_per_second(speed);
        if gain <= 0.0 {
            return f64::INFINITY;
        }
        remaining / gain
    }

    /// Gauge value as a percentage of the maximum, capped at 100.
    pub fn percentage(&self, progress: f64) -> f64 {
        if self.max <= 0.0 {
            return 100.0;
        }
        (progress / self.max * 100.0).min(100.0)
    }
}

impl Default for AtbTracker {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_ATB_BASE_RATE, GameConfig::DEFAULT_ATB_MAX)
    }
}

/// Wall-clock timer for the player's cast in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CastTimer {
    casting: bool,
    spell_index: Option<usize>,
    start_ms: u64,
    duration_ms: f64,
    progress: f64,
}

impl CastTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts timing a cast of `duration_secs`, replacing any cast in flight.
    pub fn start(&mut self, spell_index: usize, duration_secs: f64, now_ms: u64) {
        *self = Self {
            casting: true,
            spell_index: Some(spell_index),
            start_ms: now_ms,
            duration_ms: duration_secs.max(0.0) * 1000.0,
            progress: 0.0,
        };
    }

    /// Re-arms a cast that had already reached `progress` before a reload.
    pub fn resume(&mut self, spell_index: usize, duration_secs: f64, progress: f64, now_ms: u64) {
        self.start(spell_index, duration_secs, now_ms);
        let progress = progress.clamp(0.0, 1.0);
        let elapsed = (self.duration_ms * progress).round() as u64;
        self.start_ms = now_ms.saturating_sub(elapsed);
        self.progress = progress;
    }

    /// Recomputes progress from wall-clock elapsed time. No-op when idle.
    pub fn update(&mut self, now_ms: u64) {
        if !self.casting {
            return;
        }
        if self.duration_ms <= 0.0 {
            self.progress = 1.0;
            return;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms) as f64;
        self.progress = (elapsed / self.duration_ms).clamp(0.0, 1.0);
    }

    pub fn is_complete(&self) -> bool {
        self.casting && self.progress >= 1.0
    }

    pub fn is_casting(&self) -> bool {
        self.casting
    }

    pub fn spell_index(&self) -> Option<usize> {
        self.spell_index
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn percentage(&self) -> f64 {
        self.progress * 100.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_ten_gain_rate() {
        let atb = AtbTracker::default();
        let after = atb.update(10, 1.0, 0.0);
        assert!((after - 200.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_is_monotonic_and_capped() {
        let atb = AtbTracker::default();
        let mut value = 0.0;
        for _ in 0..200 {
            let next = atb.update(12, 1.0 / 60.0, value);
            assert!(next >= value);
            assert!(next <= 100.0);
            value = next;
        }
        assert_eq!(value, 100.0);
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let atb = AtbTracker::default();
        assert_eq!(atb.update(12, -1.0, 40.0), 40.0);
    }

    #[test]
    fn test_ready_threshold() {
        let atb = AtbTracker::default();
        assert!(!atb.is_ready(0.0));
        assert!(!atb.is_ready(99.999));
        assert!(atb.is_ready(100.0));
    }

    #[test]
    fn test_predict_matches_update() {
        let atb = AtbTracker::default();
        assert_eq!(atb.predict(10.0, 15, 0.5), atb.update(15, 0.5, 10.0));
        assert_eq!(atb.predict(90.0, 15, 10.0), 100.0);
    }

    #[test]
    fn test_time_to_ready() {
        let atb = AtbTracker::default();
        // speed 15 gains 50 per second
        assert!((atb.time_to_ready(0.0, 15) - 2.0).abs() < 1e-9);
        assert_eq!(atb.time_to_ready(100.0, 15), 0.0);
        assert!(atb.time_to_ready(0.0, 0).is_infinite());
    }

    #[test]
    fn test_cast_timer_uses_wall_clock() {
        let mut timer = CastTimer::new();
        timer.start(1, 1.5, 10_000);
        timer.update(10_750);
        assert!((timer.progress() - 0.5).abs() < 1e-9);
        assert!(!timer.is_complete());
        timer.update(12_000);
        assert_eq!(timer.progress(), 1.0);
        assert!(timer.is_complete());
    }

    #[test]
    fn test_cast_timer_reset_returns_to_initial_shape() {
        let mut timer = CastTimer::new();
        timer.start(2, 2.0, 0);
        timer.update(500);
        timer.reset();
        assert!(!timer.is_casting());
        assert_eq!(timer.spell_index(), None);
        assert_eq!(timer.progress(), 0.0);
        assert_eq!(timer, CastTimer::default());
    }

    #[test]
    fn test_resume_keeps_saved_progress() {
        let mut timer = CastTimer::new();
        timer.resume(0, 2.0, 0.25, 5_000);
        timer.update(5_000);
        assert!((timer.progress() - 0.25).abs() < 1e-9);
        timer.update(6_500);
        assert!(timer.is_complete());
    }

    #[test]
    fn test_zero_duration_completes_on_first_update() {
        let mut timer = CastTimer::new();
        timer.start(0, 0.0, 100);
        timer.update(100);
        assert!(timer.is_complete());
    }
}
