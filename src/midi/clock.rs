//! Tempo-aware tick-to-seconds conversion
//!
//! MIDI files timestamp events in ticks whose wall-clock length depends on
//! the tempo in effect at that moment. The clock advances through the
//! tick-sorted event stream, applying each `set_tempo` change to all
//! subsequent tick deltas.

/// Default MIDI tempo: 500,000 microseconds per beat (120 BPM)
pub const DEFAULT_TEMPO_US_PER_BEAT: u32 = 500_000;

/// Converts absolute tick positions to seconds across tempo changes
///
/// Feed events in non-decreasing tick order; `advance_to` returns the
/// wall-clock time of the given tick under the tempo history seen so far.
#[derive(Debug, Clone)]
pub struct TempoClock {
    ticks_per_beat: u32,
    tempo_us_per_beat: u32,
    last_tick: u32,
    current_time: f64,
}

impl TempoClock {
    /// Create a clock at tick 0, time 0, default tempo
    pub fn new(ticks_per_beat: u32) -> Self {
        Self {
            ticks_per_beat: ticks_per_beat.max(1),
            tempo_us_per_beat: DEFAULT_TEMPO_US_PER_BEAT,
            last_tick: 0,
            current_time: 0.0,
        }
    }

    /// Advance to an absolute tick position, returning the time in seconds
    ///
    /// Ticks must be non-decreasing across calls; an earlier tick does not
    /// move the clock backwards.
    pub fn advance_to(&mut self, tick: u32) -> f32 {
        if tick > self.last_tick {
            let tick_delta = (tick - self.last_tick) as f64;
            let seconds_per_tick =
                self.tempo_us_per_beat as f64 / (self.ticks_per_beat as f64 * 1_000_000.0);
            self.current_time += tick_delta * seconds_per_tick;
            self.last_tick = tick;
        }
        self.current_time as f32
    }

    /// Apply a `set_tempo` change effective from the current position
    pub fn set_tempo(&mut self, tempo_us_per_beat: u32) {
        self.tempo_us_per_beat = tempo_us_per_beat.max(1);
    }

    /// Tempo currently in effect, in microseconds per beat
    pub fn tempo_us_per_beat(&self) -> u32 {
        self.tempo_us_per_beat
    }

    /// Current time in seconds
    pub fn current_time(&self) -> f32 {
        self.current_time as f32
    }

    /// Tempo currently in effect, in beats per minute
    pub fn bpm(&self) -> f32 {
        60_000_000.0 / self.tempo_us_per_beat as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tempo_120_bpm() {
        let mut clock = TempoClock::new(480);
        // One beat = 480 ticks = 0.5 seconds at 120 BPM
        let t = clock.advance_to(480);
        assert!((t - 0.5).abs() < 1e-6);
        assert!((clock.bpm() - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_tempo_change_applies_forward() {
        let mut clock = TempoClock::new(480);
        clock.advance_to(480); // 0.5s at 120 BPM
        clock.set_tempo(1_000_000); // 60 BPM
        let t = clock.advance_to(960); // one more beat at 1.0s/beat
        assert!((t - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_non_decreasing_ticks() {
        let mut clock = TempoClock::new(480);
        clock.advance_to(480);
        // Same (or earlier) tick does not move time backwards
        let t = clock.advance_to(480);
        assert!((t - 0.5).abs() < 1e-6);
        let t = clock.advance_to(240);
        assert!((t - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_ticks_per_beat_clamped() {
        let mut clock = TempoClock::new(0);
        // Must not divide by zero
        let t = clock.advance_to(100);
        assert!(t.is_finite());
    }
}
