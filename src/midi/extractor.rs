//! MIDI note-event extraction
//!
//! Parses a Standard MIDI File, merges all tracks into one tick-ordered
//! stream, converts ticks to seconds through the tempo clock, and pairs
//! note-on with note-off markers. Pairing uses an explicit FIFO queue per
//! `(note, channel)` key: a note-off closes the earliest still-open note-on
//! for that key, which handles overlapping re-strikes of the same key.
//!
//! A `note_on` with velocity 0 is treated as `note_off`, per the MIDI
//! convention. Note-ons left open at end of file are closed at the final
//! event time; unmatched note-offs are ignored.

use std::collections::{BTreeMap, VecDeque};

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::midi::clock::TempoClock;
use crate::midi::MidiNote;

/// Chromatic note names, C-based (MIDI octave numbering)
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Complete MIDI extraction output for one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MidiExtraction {
    /// Source file path
    pub source_file: String,

    /// Time resolution in ticks per beat
    pub ticks_per_beat: u32,

    /// Last tempo seen, in beats per minute
    pub bpm: f32,

    /// Total duration in seconds (time of the last event)
    pub duration: f32,

    /// Number of note events
    pub num_events: usize,

    /// Note events sorted by onset time
    pub events: Vec<MidiNote>,
}

/// One merged, tick-stamped message relevant to note extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimedMessage {
    /// Tempo change in microseconds per beat
    Tempo { tick: u32, us_per_beat: u32 },
    /// Note-on with non-zero velocity
    NoteOn {
        tick: u32,
        note: u8,
        velocity: u8,
        channel: u8,
    },
    /// Note-off (or note-on with velocity 0)
    NoteOff { tick: u32, note: u8, channel: u8 },
}

impl TimedMessage {
    fn tick(&self) -> u32 {
        match *self {
            TimedMessage::Tempo { tick, .. } => tick,
            TimedMessage::NoteOn { tick, .. } => tick,
            TimedMessage::NoteOff { tick, .. } => tick,
        }
    }
}

/// Convert a MIDI note number to a note name (e.g. 60 -> "C4")
pub fn midi_note_to_name(midi_number: u8) -> String {
    let octave = (midi_number as i32 / 12) - 1;
    let name = NOTE_NAMES[midi_number as usize % 12];
    format!("{}{}", name, octave)
}

/// Extract timestamped note events from a MIDI file
///
/// # Errors
///
/// Returns `ExtractionError::DecodingError` if the file cannot be read or
/// parsed, and `ExtractionError::InvalidInput` for SMPTE-timecode files
/// (only metrical ticks-per-beat timing is supported).
pub fn extract_midi_notes(path: &str) -> Result<MidiExtraction, ExtractionError> {
    log::debug!("Extracting MIDI notes from {}", path);

    let bytes = std::fs::read(path)
        .map_err(|e| ExtractionError::DecodingError(format!("Failed to read {}: {}", path, e)))?;

    let smf = Smf::parse(&bytes)
        .map_err(|e| ExtractionError::DecodingError(format!("MIDI parse failed: {}", e)))?;

    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpb) => tpb.as_int() as u32,
        Timing::Timecode(..) => {
            return Err(ExtractionError::InvalidInput(
                "SMPTE timecode timing is not supported".to_string(),
            ));
        }
    };

    // Merge all tracks into one stream with absolute tick positions
    let mut messages: Vec<TimedMessage> = Vec::new();
    for track in &smf.tracks {
        let mut tick: u32 = 0;
        for ev in track {
            tick = tick.saturating_add(ev.delta.as_int());
            match ev.kind {
                TrackEventKind::Meta(MetaMessage::Tempo(us)) => {
                    messages.push(TimedMessage::Tempo {
                        tick,
                        us_per_beat: us.as_int(),
                    });
                }
                TrackEventKind::Midi { channel, message } => match message {
                    MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                        messages.push(TimedMessage::NoteOn {
                            tick,
                            note: key.as_int(),
                            velocity: vel.as_int(),
                            channel: channel.as_int(),
                        });
                    }
                    MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                        messages.push(TimedMessage::NoteOff {
                            tick,
                            note: key.as_int(),
                            channel: channel.as_int(),
                        });
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    // Stable sort: equal ticks keep track order, matching the merge order
    // tempo changes must be applied in
    messages.sort_by_key(|m| m.tick());

    let (events, clock) = pair_note_events(&messages, ticks_per_beat);

    log::debug!(
        "MIDI extraction: {} events over {:.2}s at {:.1} BPM",
        events.len(),
        clock.current_time(),
        clock.bpm()
    );

    Ok(MidiExtraction {
        source_file: path.to_string(),
        ticks_per_beat,
        bpm: clock.bpm(),
        duration: clock.current_time(),
        num_events: events.len(),
        events,
    })
}

/// Pair note-on/note-off messages into note spans
///
/// Messages must be in non-decreasing tick order. Returns the events
/// sorted by onset time plus the clock in its final state.
pub(crate) fn pair_note_events(
    messages: &[TimedMessage],
    ticks_per_beat: u32,
) -> (Vec<MidiNote>, TempoClock) {
    let mut clock = TempoClock::new(ticks_per_beat);
    // BTreeMap keeps end-of-file draining deterministic
    let mut open: BTreeMap<(u8, u8), VecDeque<(f32, u8)>> = BTreeMap::new();
    let mut events: Vec<MidiNote> = Vec::new();

    for message in messages {
        let time = clock.advance_to(message.tick());
        match *message {
            TimedMessage::Tempo { us_per_beat, .. } => {
                clock.set_tempo(us_per_beat);
            }
            TimedMessage::NoteOn {
                note,
                velocity,
                channel,
                ..
            } => {
                open.entry((note, channel))
                    .or_default()
                    .push_back((time, velocity));
            }
            TimedMessage::NoteOff { note, channel, .. } => {
                if let Some((start_time, velocity)) =
                    open.get_mut(&(note, channel)).and_then(|queue| queue.pop_front())
                {
                    events.push(MidiNote {
                        time: start_time,
                        midi_number: note,
                        note_name: midi_note_to_name(note),
                        velocity,
                        duration: (time - start_time).max(0.0),
                        channel,
                    });
                }
                // Unmatched note-off: ignore
            }
        }
    }

    // Close notes still sounding at end of file
    let end_time = clock.current_time();
    for ((note, channel), starts) in open {
        for (start_time, velocity) in starts {
            events.push(MidiNote {
                time: start_time,
                midi_number: note,
                note_name: midi_note_to_name(note),
                velocity,
                duration: (end_time - start_time).max(0.0),
                channel,
            });
        }
    }

    events.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));

    (events, clock)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(tick: u32, note: u8, velocity: u8) -> TimedMessage {
        TimedMessage::NoteOn {
            tick,
            note,
            velocity,
            channel: 0,
        }
    }

    fn off(tick: u32, note: u8) -> TimedMessage {
        TimedMessage::NoteOff {
            tick,
            note,
            channel: 0,
        }
    }

    #[test]
    fn test_note_names() {
        assert_eq!(midi_note_to_name(60), "C4");
        assert_eq!(midi_note_to_name(21), "A0");
        assert_eq!(midi_note_to_name(108), "C8");
        assert_eq!(midi_note_to_name(0), "C-1");
        assert_eq!(midi_note_to_name(70), "A#4");
    }

    #[test]
    fn test_simple_pairing() {
        // 480 tpb, default 120 BPM: 480 ticks = 0.5s
        let messages = vec![on(0, 60, 100), off(480, 60)];
        let (events, _) = pair_note_events(&messages, 480);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].midi_number, 60);
        assert_eq!(events[0].velocity, 100);
        assert!((events[0].time - 0.0).abs() < 1e-6);
        assert!((events[0].duration - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fifo_pairing_of_overlapping_restrikes() {
        // Same key struck twice before the first off: FIFO means the first
        // off closes the first on
        let messages = vec![on(0, 60, 100), on(240, 60, 80), off(480, 60), off(960, 60)];
        let (events, _) = pair_note_events(&messages, 480);

        assert_eq!(events.len(), 2);
        assert!((events[0].time - 0.0).abs() < 1e-6);
        assert!((events[0].duration - 0.5).abs() < 1e-6);
        assert_eq!(events[0].velocity, 100);
        assert!((events[1].time - 0.25).abs() < 1e-6);
        assert!((events[1].duration - 0.75).abs() < 1e-6);
        assert_eq!(events[1].velocity, 80);
    }

    #[test]
    fn test_tempo_change_affects_later_durations() {
        let messages = vec![
            on(0, 60, 100),
            TimedMessage::Tempo {
                tick: 0,
                us_per_beat: 1_000_000, // 60 BPM
            },
            off(480, 60),
        ];
        // Tempo change is at tick 0 but sorted after the note-on; it still
        // applies to the whole span since no time elapsed before it
        let (events, clock) = pair_note_events(&messages, 480);

        assert_eq!(events.len(), 1);
        assert!((events[0].duration - 1.0).abs() < 1e-6);
        assert!((clock.bpm() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_unmatched_off_ignored() {
        let messages = vec![off(100, 60), on(200, 62, 90), off(400, 62)];
        let (events, _) = pair_note_events(&messages, 480);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].midi_number, 62);
    }

    #[test]
    fn test_dangling_on_closed_at_end_of_file() {
        let messages = vec![on(0, 60, 100), on(480, 64, 90), off(960, 64)];
        let (events, _) = pair_note_events(&messages, 480);

        assert_eq!(events.len(), 2);
        // Note 60 never received an off; closed at the last event time (1.0s)
        let dangling = events.iter().find(|e| e.midi_number == 60).unwrap();
        assert!((dangling.duration - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_events_sorted_by_onset_time() {
        let messages = vec![
            on(480, 60, 100),
            off(960, 60),
            on(0, 64, 90),
            off(240, 64),
        ];
        // Different tracks can contribute out-of-order onsets; the merge
        // sorts by tick before pairing in real use, but pairing itself also
        // sorts the output by onset
        let mut sorted = messages.clone();
        sorted.sort_by_key(|m| m.tick());
        let (events, _) = pair_note_events(&sorted, 480);

        assert_eq!(events.len(), 2);
        assert!(events[0].time <= events[1].time);
        assert_eq!(events[0].midi_number, 64);
    }

    #[test]
    fn test_zero_velocity_on_is_off() {
        // The merge phase maps vel-0 note-on to NoteOff before pairing;
        // verify the pairing path it produces
        let messages = vec![on(0, 60, 100), off(480, 60)];
        let (events, _) = pair_note_events(&messages, 480);
        assert_eq!(events.len(), 1);
    }
}
