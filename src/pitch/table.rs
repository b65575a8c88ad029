//! Equal-temperament pitch table for the 88 piano keys
//!
//! Keys are numbered 1..=88 with key 49 = A4 = 440 Hz, covering A0
//! (27.5 Hz) through C8 (4186 Hz). The table is rebuilt from the closed
//! formula on demand, so it is reproducible bit-for-bit with no cached
//! state to go stale.

/// Number of keys on a standard piano
pub const PIANO_KEYS: usize = 88;

/// MIDI note number of the lowest piano key (A0)
const MIDI_A0: u8 = 21;

/// Chromatic note names starting at A (key 1 = A0)
const NOTE_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// One piano pitch
#[derive(Debug, Clone, PartialEq)]
pub struct Pitch {
    /// Fundamental frequency in Hz
    pub frequency_hz: f32,

    /// Note name with octave (e.g. "A0", "C4", "F#5")
    pub name: String,

    /// MIDI note number (A0 = 21, C8 = 108)
    pub midi_number: u8,
}

/// The fixed table of 88 piano pitches, indexed 0..=87 (key number - 1)
///
/// Frequencies follow equal temperament: `f(n) = 440 * 2^((n - 49) / 12)`
/// for key number `n` in 1..=88. Frequencies are strictly increasing, and
/// `midi_number` for index `i` is `i + 21`.
///
/// # Example
///
/// ```
/// use pianoscribe::pitch::PitchTable;
///
/// let table = PitchTable::new();
/// assert_eq!(table.len(), 88);
/// assert_eq!(table.get(48).unwrap().name, "A4");
/// assert!((table.get(48).unwrap().frequency_hz - 440.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct PitchTable {
    pitches: Vec<Pitch>,
}

impl PitchTable {
    /// Build the pitch table from the equal-temperament formula
    pub fn new() -> Self {
        let mut pitches = Vec::with_capacity(PIANO_KEYS);

        for key in 1..=PIANO_KEYS {
            let frequency_hz = 440.0 * 2.0f32.powf((key as f32 - 49.0) / 12.0);

            let letter = NOTE_NAMES[(key - 1) % 12];
            // Octave rolls over between B and C; A0-B0 are octave 0, C1 starts octave 1.
            let octave = (key + 8) / 12;

            pitches.push(Pitch {
                frequency_hz,
                name: format!("{}{}", letter, octave),
                midi_number: (key - 1) as u8 + MIDI_A0,
            });
        }

        Self { pitches }
    }

    /// Number of pitches (always 88)
    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    /// True if the table is empty (never, in practice)
    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Pitch at index 0..=87, or `None` out of range
    pub fn get(&self, index: usize) -> Option<&Pitch> {
        self.pitches.get(index)
    }

    /// All 88 pitches in ascending frequency order
    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    /// The 88 fundamental frequencies in Hz, ascending
    pub fn frequencies(&self) -> Vec<f32> {
        self.pitches.iter().map(|p| p.frequency_hz).collect()
    }
}

impl Default for PitchTable {
    fn default() -> Self {
        Self::new()
    }
}
