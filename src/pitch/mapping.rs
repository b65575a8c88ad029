//! Mapping piano pitches onto spectral frequency bins
//!
//! Each pitch frequency is assigned the index of the nearest bin center in
//! the frequency axis. No interpolation is performed: a low-resolution axis
//! simply yields coarser (possibly shared) bin assignments, and detection
//! quality degrades gracefully rather than erroring.

use crate::error::ExtractionError;

/// Map each pitch frequency to the index of its nearest frequency bin
///
/// # Arguments
///
/// * `frequency_axis` - Bin center frequencies in Hz, strictly increasing
/// * `pitch_freqs` - Pitch fundamental frequencies in Hz
///
/// # Returns
///
/// One bin index per pitch frequency, in pitch order. Ties between two
/// equally distant bins resolve to the lower index (first minimum found
/// when scanning the axis in order).
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if the frequency axis is empty.
pub fn map_pitches_to_bins(
    frequency_axis: &[f32],
    pitch_freqs: &[f32],
) -> Result<Vec<usize>, ExtractionError> {
    if frequency_axis.is_empty() {
        return Err(ExtractionError::InvalidInput(
            "Frequency axis is empty".to_string(),
        ));
    }

    log::debug!(
        "Mapping {} pitches onto {} frequency bins ({:.1}-{:.1} Hz)",
        pitch_freqs.len(),
        frequency_axis.len(),
        frequency_axis[0],
        frequency_axis[frequency_axis.len() - 1]
    );

    let bins = pitch_freqs
        .iter()
        .map(|&pf| {
            let mut best_idx = 0;
            let mut best_dist = (frequency_axis[0] - pf).abs();
            for (idx, &bin_freq) in frequency_axis.iter().enumerate().skip(1) {
                let dist = (bin_freq - pf).abs();
                // Strict < keeps the first (lower) index on exact ties
                if dist < best_dist {
                    best_dist = dist;
                    best_idx = idx;
                }
            }
            best_idx
        })
        .collect();

    Ok(bins)
}
