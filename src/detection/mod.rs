//! Note-onset detection modules
//!
//! The core detection pipeline:
//! - Per-pitch onset-strength signals (rectified magnitude differencing)
//! - Generic peak picking with height/prominence/distance filters
//! - Harmonic suppression of near-simultaneous competing detections
//! - Orchestration over the full spectrogram

pub mod harmonics;
pub mod onset;
pub mod peaks;
pub mod pipeline;

pub use pipeline::extract_note_events;

/// Raw onset detection, before harmonic resolution
///
/// Carries the internal `pitch_index` so the resolver and tests can reason
/// about which key produced it; the public `NoteEvent` drops that field.
#[derive(Debug, Clone)]
pub struct RawEvent {
    /// Onset time in seconds (always an exact member of the time axis)
    pub time: f32,

    /// Piano key index, 0..=87
    pub pitch_index: usize,

    /// Note name with octave (e.g. "C4")
    pub note_name: String,

    /// Pitch fundamental frequency in Hz
    pub frequency_hz: f32,

    /// Normalized magnitude at the onset frame, in [0, 1]
    pub magnitude: f32,

    /// Onset strength (rectified magnitude increase) at the onset frame
    pub onset_strength: f32,

    /// MIDI note number, 21..=108
    pub midi_number: u8,
}
