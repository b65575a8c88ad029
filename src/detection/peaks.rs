//! Robust peak detection over 1-D signals
//!
//! Generic local-maximum finder used for per-pitch onset picking. Filters
//! candidates by height, then by prominence, then greedily resolves
//! minimum-distance conflicts.

/// Find peaks in a signal
///
/// A candidate peak is an interior index `k` with
/// `signal[k] > signal[k-1]` and `signal[k] > signal[k+1]`; endpoints are
/// never peaks. Candidates are filtered in order:
///
/// 1. Height: the peak value must be at least `min_height`.
/// 2. Prominence: the drop from the peak to the lowest point between it and
///    the nearest strictly higher value on each side (or the series end)
///    must be at least `min_prominence` on the smaller side.
/// 3. Distance: among peaks closer than `min_distance` indices apart, the
///    highest wins and the others are discarded entirely. Conflicts are
///    resolved greedily, repeatedly taking the highest remaining candidate.
///
/// Thresholds are inclusive lower bounds; negative values disable the
/// corresponding filter.
///
/// # Arguments
///
/// * `signal` - Signal to find peaks in
/// * `min_height` - Minimum peak value
/// * `min_prominence` - Minimum peak prominence
/// * `min_distance` - Minimum index gap between accepted peaks
///
/// # Returns
///
/// Accepted peak indices in ascending order.
///
/// # Example
///
/// ```
/// use pianoscribe::detection::peaks::find_peaks;
///
/// let signal = vec![0.0, 0.5, 1.0, 0.7, 0.3, 0.9, 0.2];
/// let peaks = find_peaks(&signal, 0.5, 0.0, 1);
/// assert_eq!(peaks, vec![2, 5]);
/// ```
pub fn find_peaks(
    signal: &[f32],
    min_height: f32,
    min_prominence: f32,
    min_distance: usize,
) -> Vec<usize> {
    if signal.len() < 3 {
        // Need at least 3 points for an interior local maximum
        return vec![];
    }

    // Candidate local maxima, height-filtered
    let mut candidates: Vec<usize> = Vec::new();
    for k in 1..(signal.len() - 1) {
        let value = signal[k];
        if value > signal[k - 1] && value > signal[k + 1] && value >= min_height {
            candidates.push(k);
        }
    }

    // Prominence filter
    candidates.retain(|&k| prominence(signal, k) >= min_prominence);

    // Greedy distance resolution: highest remaining candidate wins, all
    // others within min_distance of it are discarded.
    if min_distance > 1 && candidates.len() > 1 {
        let mut by_height = candidates.clone();
        // Stable sort keeps the lower index first on exact value ties
        by_height.sort_by(|&a, &b| {
            signal[b]
                .partial_cmp(&signal[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut accepted: Vec<usize> = Vec::new();
        for idx in by_height {
            let conflict = accepted
                .iter()
                .any(|&kept| idx.abs_diff(kept) < min_distance);
            if !conflict {
                accepted.push(idx);
            }
        }

        accepted.sort_unstable();
        candidates = accepted;
    }

    candidates
}

/// Prominence of the peak at index `k`
///
/// Scans outward on each side until a strictly higher value (or the series
/// end) is reached, tracking the lowest valley crossed. The prominence is
/// the drop from the peak to the higher of the two valley floors, i.e. the
/// smaller-side drop.
fn prominence(signal: &[f32], k: usize) -> f32 {
    let peak = signal[k];

    let mut left_min = peak;
    for j in (0..k).rev() {
        if signal[j] > peak {
            break;
        }
        if signal[j] < left_min {
            left_min = signal[j];
        }
    }

    let mut right_min = peak;
    for &v in &signal[k + 1..] {
        if v > peak {
            break;
        }
        if v < right_min {
            right_min = v;
        }
    }

    peak - left_min.max(right_min)
}
