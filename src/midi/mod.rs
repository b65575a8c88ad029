//! Symbolic MIDI note extraction
//!
//! A separate, simpler pipeline than the audio path: it parses a Standard
//! MIDI File and pairs note-on/note-off markers through a tempo-aware clock
//! to produce timestamped note events with durations. No spectral analysis
//! is involved.

pub mod clock;
pub mod extractor;

use serde::{Deserialize, Serialize};

pub use extractor::{extract_midi_notes, midi_note_to_name, MidiExtraction};

/// One note span recovered from a MIDI file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidiNote {
    /// Note-on time in seconds
    pub time: f32,

    /// MIDI note number, 0..=127
    pub midi_number: u8,

    /// Note name with octave (e.g. "C4", "A#5")
    pub note_name: String,

    /// Note-on velocity, 1..=127
    pub velocity: u8,

    /// Seconds until the matching note-off (0 if the off precedes the on)
    pub duration: f32,

    /// MIDI channel, 0..=15
    pub channel: u8,
}
