//! Configuration parameters for note extraction

/// Note extraction configuration parameters
///
/// Thresholds are inclusive lower bounds. Negative values are permitted and
/// simply disable the corresponding filter (a negative bound excludes
/// nothing), so malformed configurations degrade to permissive behavior
/// rather than erroring.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    // Onset detection
    /// Minimum onset-strength increase to qualify as a candidate peak (default: 0.02)
    ///
    /// Onset strength is the rectified frame-to-frame magnitude difference of
    /// a single pitch channel, so 0.02 means "the bin gained at least 2% of
    /// the global spectrogram maximum in one frame".
    pub onset_threshold: f32,

    /// Minimum local prominence required of a candidate peak (default: 0.01)
    pub peak_prominence: f32,

    /// Minimum time separation between accepted onsets of the same pitch,
    /// in seconds (default: 0.05)
    ///
    /// Converted to a frame distance internally; values at or below one
    /// frame period clamp to a distance of one frame.
    pub min_note_gap: f32,

    /// Minimum absolute magnitude at the peak frame to accept the onset
    /// (default: 0.1)
    ///
    /// The onset-strength peak alone is not enough; the bin must also carry
    /// musically plausible energy at the moment of attack.
    pub min_magnitude: f32,

    // STFT parameters (used by the convenience sample-based entry point)
    /// STFT window length in samples (default: 4096)
    ///
    /// Longer windows improve frequency resolution, which matters for the
    /// closely spaced low piano keys.
    pub window_size: usize,

    /// STFT hop size in samples (default: 2048, i.e. half-window overlap)
    pub hop_size: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            onset_threshold: 0.02,
            peak_prominence: 0.01,
            min_note_gap: 0.05,
            min_magnitude: 0.1,
            window_size: 4096,
            hop_size: 2048,
        }
    }
}
