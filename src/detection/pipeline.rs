//! Detection pipeline orchestration
//!
//! Runs the full chain over one spectrogram: pitch table, bin mapping,
//! per-pitch onset detection, global merge and sort, harmonic resolution.
//! Each pitch reads only its own projection of the read-only magnitude
//! grid, so the 88 channels are processed in parallel with rayon and merged
//! in pitch order afterwards; determinism is unaffected.

use rayon::prelude::*;

use crate::config::ExtractionConfig;
use crate::detection::harmonics::resolve_harmonics;
use crate::detection::onset::detect_pitch_onsets;
use crate::detection::RawEvent;
use crate::error::ExtractionError;
use crate::pitch::{map_pitches_to_bins, PitchTable};
use crate::result::NoteEvent;
use crate::transform::Spectrogram;

/// Extract note-onset events from a normalized spectrogram
///
/// # Arguments
///
/// * `spectrogram` - Normalized magnitude surface (values in [0, 1])
/// * `config` - Detection thresholds
///
/// # Returns
///
/// Note events in non-decreasing time order. Every event's time is an
/// exact member of the spectrogram's time axis. An empty spectrogram (zero
/// bins or zero frames) yields an empty list, not an error.
///
/// # Errors
///
/// Returns `ExtractionError` only for structurally invalid input; an
/// all-zero magnitude grid simply produces no events.
///
/// # Example
///
/// ```no_run
/// use pianoscribe::detection::extract_note_events;
/// use pianoscribe::transform::Spectrogram;
/// use pianoscribe::ExtractionConfig;
///
/// let spec = Spectrogram::new(vec![], vec![], vec![])?;
/// let events = extract_note_events(&spec, &ExtractionConfig::default())?;
/// assert!(events.is_empty());
/// # Ok::<(), pianoscribe::ExtractionError>(())
/// ```
pub fn extract_note_events(
    spectrogram: &Spectrogram,
    config: &ExtractionConfig,
) -> Result<Vec<NoteEvent>, ExtractionError> {
    if spectrogram.num_bins() == 0 || spectrogram.num_frames() == 0 {
        log::debug!("Empty spectrogram, no events to extract");
        return Ok(Vec::new());
    }

    let table = PitchTable::new();
    let bins = map_pitches_to_bins(&spectrogram.frequency_axis, &table.frequencies())?;

    // Same-pitch onset separation in frames. Gaps at or below one frame
    // period clamp to 1; one frame is the minimum meaningful separation.
    let min_distance = match spectrogram.frame_period() {
        Some(period) if period > 0.0 => {
            ((config.min_note_gap / period).round() as usize).max(1)
        }
        _ => 1,
    };

    log::debug!(
        "Extracting onsets: {} frames, min_distance={} frames, thresholds: onset={:.3} prominence={:.3} magnitude={:.3}",
        spectrogram.num_frames(),
        min_distance,
        config.onset_threshold,
        config.peak_prominence,
        config.min_magnitude
    );

    // Per-pitch detection is embarrassingly parallel; collect preserves
    // pitch order so the later stable sort sees a deterministic sequence.
    let per_pitch: Vec<Vec<RawEvent>> = (0..table.len())
        .into_par_iter()
        .map(|pitch_index| {
            let channel = &spectrogram.magnitude[bins[pitch_index]];
            detect_pitch_onsets(
                channel,
                &spectrogram.time_axis,
                pitch_index,
                &table.pitches()[pitch_index],
                config,
                min_distance,
            )
        })
        .collect();

    let mut raw: Vec<RawEvent> = per_pitch.into_iter().flatten().collect();

    // Stable sort: exact time ties keep per-pitch order, so equal inputs
    // always produce byte-identical output.
    raw.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));

    let resolved = resolve_harmonics(raw);

    log::debug!("Extraction produced {} note events", resolved.len());

    Ok(resolved.into_iter().map(NoteEvent::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchTable;

    /// Spectrogram whose frequency axis carries one exact bin per piano
    /// key, so pitch i maps onto bin i.
    fn piano_aligned_spectrogram(num_frames: usize) -> Spectrogram {
        let table = PitchTable::new();
        let frequency_axis = table.frequencies();
        let time_axis: Vec<f32> = (0..num_frames).map(|i| i as f32 * 0.05).collect();
        let magnitude = vec![vec![0.0f32; num_frames]; frequency_axis.len()];
        Spectrogram::new(frequency_axis, time_axis, magnitude).unwrap()
    }

    fn test_config() -> ExtractionConfig {
        ExtractionConfig {
            onset_threshold: 0.1,
            peak_prominence: 0.05,
            min_magnitude: 0.1,
            min_note_gap: 0.01,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_spectrogram() {
        let spec = Spectrogram::new(vec![], vec![], vec![]).unwrap();
        let events = extract_note_events(&spec, &test_config()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_all_zero_grid_produces_no_events() {
        let spec = piano_aligned_spectrogram(10);
        let events = extract_note_events(&spec, &test_config()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_single_pitch_attack() {
        let mut spec = piano_aligned_spectrogram(8);
        spec.magnitude[40] = vec![0.0, 0.0, 0.0, 0.9, 0.9, 0.9, 0.0, 0.0];

        let events = extract_note_events(&spec, &test_config()).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].midi_number, 40 + 21);
        assert!((events[0].time - 0.15).abs() < 1e-6);
        assert!((events[0].onset_strength - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_events_time_sorted_and_quantized() {
        let mut spec = piano_aligned_spectrogram(20);
        spec.magnitude[30][5] = 0.8;
        spec.magnitude[30][6] = 0.8;
        spec.magnitude[50][12] = 0.9;
        spec.magnitude[50][13] = 0.9;
        spec.magnitude[10][2] = 0.7;
        spec.magnitude[10][3] = 0.7;

        let events = extract_note_events(&spec, &test_config()).unwrap();

        assert_eq!(events.len(), 3);
        for w in events.windows(2) {
            assert!(w[0].time <= w[1].time);
        }
        for event in &events {
            assert!(
                spec.time_axis.iter().any(|&t| t == event.time),
                "Event time {} must be an exact member of the time axis",
                event.time
            );
        }
    }

    #[test]
    fn test_min_note_gap_clamps_to_one_frame() {
        let mut spec = piano_aligned_spectrogram(12);
        // Two clean attacks on the same pitch, far apart
        spec.magnitude[40][3] = 0.9;
        spec.magnitude[40][4] = 0.9;
        spec.magnitude[40][9] = 0.9;
        spec.magnitude[40][10] = 0.9;

        let mut config = test_config();
        config.min_note_gap = 0.0;

        let events = extract_note_events(&spec, &config).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_determinism() {
        let mut spec = piano_aligned_spectrogram(30);
        for (pitch, frame) in [(20usize, 4usize), (32, 4), (39, 4), (50, 15), (61, 22)] {
            spec.magnitude[pitch][frame] = 0.9;
            spec.magnitude[pitch][frame + 1] = 0.9;
        }

        let config = test_config();
        let a = extract_note_events(&spec, &config).unwrap();
        let b = extract_note_events(&spec, &config).unwrap();
        assert_eq!(a, b);
    }
}
