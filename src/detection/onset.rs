//! Per-pitch onset-strength signals and raw event generation
//!
//! Each of the 88 pitches is processed independently over its own magnitude
//! time-series. The onset-strength signal is the rectified first difference
//! of the channel: `max(0, m[k] - m[k-1])`, with the first element 0 (no
//! prior frame). No smoothing is applied; onset strength is intentionally a
//! cheap, causal signal that depends only on the current and previous frame.
//!
//! Detecting onsets per pitch channel (rather than per frame across
//! pitches) keys on the temporal attack shape of each bin. A struck note
//! lights up many bins at once through its harmonic series, but each bin's
//! own attack transient remains a reliable onset cue.

use crate::config::ExtractionConfig;
use crate::detection::peaks::find_peaks;
use crate::detection::RawEvent;
use crate::pitch::Pitch;

/// Rectified first difference of a magnitude channel
///
/// `strength[0]` is defined as 0; `strength[k] = max(0, m[k] - m[k-1])`
/// for all later frames. The output is aligned 1:1 with the input.
pub fn onset_strength(channel: &[f32]) -> Vec<f32> {
    let mut strength = Vec::with_capacity(channel.len());
    if channel.is_empty() {
        return strength;
    }

    strength.push(0.0);
    for k in 1..channel.len() {
        strength.push((channel[k] - channel[k - 1]).max(0.0));
    }

    strength
}

/// Detect raw onset events for one pitch channel
///
/// Runs the peak detector over the channel's onset-strength signal, then
/// applies the absolute magnitude floor: a strength peak whose frame
/// magnitude is below `min_magnitude` is discarded, since the attack alone
/// is not musically plausible without energy behind it.
///
/// # Arguments
///
/// * `channel` - The pitch's magnitude time-series, aligned with `time_axis`
/// * `time_axis` - Frame timestamps in seconds
/// * `pitch_index` - Piano key index, 0..=87
/// * `pitch` - Pitch metadata for event labeling
/// * `config` - Extraction thresholds
/// * `min_distance` - Minimum frame gap between onsets of this pitch
///
/// # Returns
///
/// Raw events in ascending time order (times are exact members of
/// `time_axis`, never interpolated).
pub fn detect_pitch_onsets(
    channel: &[f32],
    time_axis: &[f32],
    pitch_index: usize,
    pitch: &Pitch,
    config: &ExtractionConfig,
    min_distance: usize,
) -> Vec<RawEvent> {
    debug_assert_eq!(channel.len(), time_axis.len());

    let strength = onset_strength(channel);
    let peaks = find_peaks(
        &strength,
        config.onset_threshold,
        config.peak_prominence,
        min_distance,
    );

    peaks
        .into_iter()
        .filter(|&k| channel[k] >= config.min_magnitude)
        .map(|k| RawEvent {
            time: time_axis[k],
            pitch_index,
            note_name: pitch.name.clone(),
            frequency_hz: pitch.frequency_hz,
            magnitude: channel[k],
            onset_strength: strength[k],
            midi_number: pitch.midi_number,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchTable;

    fn test_config() -> ExtractionConfig {
        ExtractionConfig {
            onset_threshold: 0.1,
            peak_prominence: 0.05,
            min_magnitude: 0.1,
            ..Default::default()
        }
    }

    #[test]
    fn test_onset_strength_first_element_zero() {
        let strength = onset_strength(&[0.5, 0.7, 0.2]);
        assert_eq!(strength[0], 0.0);
    }

    #[test]
    fn test_onset_strength_rectified() {
        let strength = onset_strength(&[0.0, 0.4, 0.9, 0.3, 0.3]);
        assert_eq!(strength, vec![0.0, 0.4, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_onset_strength_empty() {
        assert!(onset_strength(&[]).is_empty());
    }

    #[test]
    fn test_single_attack_yields_single_event() {
        let table = PitchTable::new();
        let pitch = table.get(40).unwrap();

        let channel = vec![0.0, 0.0, 0.0, 0.9, 0.9, 0.9, 0.0, 0.0];
        let time_axis: Vec<f32> = (0..8).map(|i| i as f32 * 0.05).collect();

        let events = detect_pitch_onsets(&channel, &time_axis, 40, pitch, &test_config(), 1);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        // Onset at the frame where magnitude first reaches 0.9
        assert!((event.time - 0.15).abs() < 1e-6);
        assert!((event.onset_strength - 0.9).abs() < 1e-6);
        assert!((event.magnitude - 0.9).abs() < 1e-6);
        assert_eq!(event.midi_number, 40 + 21);
        assert_eq!(event.note_name, pitch.name);
    }

    #[test]
    fn test_magnitude_floor_discards_weak_peaks() {
        let table = PitchTable::new();
        let pitch = table.get(40).unwrap();

        // Clear strength peak, but absolute magnitude stays below the floor
        let channel = vec![0.0, 0.0, 0.05, 0.05, 0.0, 0.0];
        let time_axis: Vec<f32> = (0..6).map(|i| i as f32 * 0.05).collect();

        let mut config = test_config();
        config.onset_threshold = 0.01;
        config.peak_prominence = 0.01;

        let events = detect_pitch_onsets(&channel, &time_axis, 40, pitch, &config, 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_silent_channel_yields_no_events() {
        let table = PitchTable::new();
        let pitch = table.get(0).unwrap();

        let channel = vec![0.0; 10];
        let time_axis: Vec<f32> = (0..10).map(|i| i as f32 * 0.05).collect();

        let events = detect_pitch_onsets(&channel, &time_axis, 0, pitch, &test_config(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_distance_keeps_stronger_of_close_onsets() {
        let table = PitchTable::new();
        let pitch = table.get(40).unwrap();

        // Two attacks two frames apart; the second is stronger
        let channel = vec![0.0, 0.4, 0.0, 0.9, 0.9, 0.0, 0.0];
        let time_axis: Vec<f32> = (0..7).map(|i| i as f32 * 0.05).collect();

        let events = detect_pitch_onsets(&channel, &time_axis, 40, pitch, &test_config(), 4);

        assert_eq!(events.len(), 1);
        assert!((events[0].onset_strength - 0.9).abs() < 1e-6);
    }
}
