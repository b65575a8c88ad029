//! Extraction result types

use serde::{Deserialize, Serialize};

use crate::detection::RawEvent;

/// One detected note onset
///
/// Field names and types are part of the output contract and are kept
/// stable for downstream consumers of the serialized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Onset time in seconds (frame-quantized, never interpolated)
    pub time: f32,

    /// Note name with octave (e.g. "A0", "C4", "F#5")
    pub note_name: String,

    /// Pitch fundamental frequency in Hz
    pub frequency_hz: f32,

    /// Normalized magnitude at the onset frame, in [0, 1]
    pub magnitude: f32,

    /// Onset strength (rectified magnitude increase) at the onset frame
    pub onset_strength: f32,

    /// MIDI note number (A0 = 21, C8 = 108)
    pub midi_number: u8,
}

impl From<RawEvent> for NoteEvent {
    fn from(raw: RawEvent) -> Self {
        Self {
            time: raw.time,
            note_name: raw.note_name,
            frequency_hz: raw.frequency_hz,
            magnitude: raw.magnitude,
            onset_strength: raw.onset_strength,
            midi_number: raw.midi_number,
        }
    }
}

/// Complete extraction output for one source file
///
/// Mirrors the JSON document shape consumed by downstream tools: summary
/// metadata alongside the ordered event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// Source identifier (typically the input file path)
    pub source_file: String,

    /// Sample rate of the decoded audio in Hz
    pub sample_rate: u32,

    /// Total duration in seconds
    pub duration: f32,

    /// Number of detected events
    pub num_events: usize,

    /// Detected note events in non-decreasing time order
    pub events: Vec<NoteEvent>,
}

impl ExtractionSummary {
    /// Assemble a summary; `num_events` is derived from the event list
    pub fn new(source_file: String, sample_rate: u32, duration: f32, events: Vec<NoteEvent>) -> Self {
        Self {
            source_file,
            sample_rate,
            duration,
            num_events: events.len(),
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> NoteEvent {
        NoteEvent {
            time: 1.25,
            note_name: "C4".to_string(),
            frequency_hz: 261.626,
            magnitude: 0.82,
            onset_strength: 0.45,
            midi_number: 60,
        }
    }

    #[test]
    fn test_note_event_field_names_stable() {
        let json = serde_json::to_value(sample_event()).unwrap();
        let obj = json.as_object().unwrap();

        for field in [
            "time",
            "note_name",
            "frequency_hz",
            "magnitude",
            "onset_strength",
            "midi_number",
        ] {
            assert!(obj.contains_key(field), "Missing field {}", field);
        }
        assert_eq!(obj.len(), 6);
    }

    #[test]
    fn test_note_event_roundtrip() {
        let event = sample_event();
        let json = serde_json::to_string(&event).unwrap();
        let back: NoteEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_summary_counts_events() {
        let summary = ExtractionSummary::new(
            "song.wav".to_string(),
            44100,
            12.5,
            vec![sample_event(), sample_event()],
        );
        assert_eq!(summary.num_events, 2);
    }
}
