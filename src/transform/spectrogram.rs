//! Time-frequency magnitude surface
//!
//! The detection pipeline consumes a `Spectrogram` read-only: a strictly
//! increasing frequency axis, a strictly increasing (uniformly spaced) time
//! axis, and a magnitude grid indexed `[bin][frame]` normalized into [0, 1].

use crate::error::ExtractionError;

/// Normalized magnitude spectrogram
#[derive(Debug, Clone)]
pub struct Spectrogram {
    /// Bin center frequencies in Hz, strictly increasing
    pub frequency_axis: Vec<f32>,

    /// Frame timestamps in seconds, strictly increasing, uniformly spaced
    pub time_axis: Vec<f32>,

    /// Magnitude grid indexed `[bin][frame]`, values in [0, 1]
    pub magnitude: Vec<Vec<f32>>,
}

impl Spectrogram {
    /// Build a spectrogram, validating dimensional consistency
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidInput` if the magnitude grid does
    /// not have one row per frequency bin, or any row's length differs from
    /// the time axis length.
    pub fn new(
        frequency_axis: Vec<f32>,
        time_axis: Vec<f32>,
        magnitude: Vec<Vec<f32>>,
    ) -> Result<Self, ExtractionError> {
        if magnitude.len() != frequency_axis.len() {
            return Err(ExtractionError::InvalidInput(format!(
                "Magnitude grid has {} rows but frequency axis has {} bins",
                magnitude.len(),
                frequency_axis.len()
            )));
        }

        for (bin, row) in magnitude.iter().enumerate() {
            if row.len() != time_axis.len() {
                return Err(ExtractionError::InvalidInput(format!(
                    "Magnitude row {} has {} frames but time axis has {}",
                    bin,
                    row.len(),
                    time_axis.len()
                )));
            }
        }

        Ok(Self {
            frequency_axis,
            time_axis,
            magnitude,
        })
    }

    /// Number of frequency bins
    pub fn num_bins(&self) -> usize {
        self.frequency_axis.len()
    }

    /// Number of time frames
    pub fn num_frames(&self) -> usize {
        self.time_axis.len()
    }

    /// Spacing between consecutive frames in seconds
    ///
    /// `None` when fewer than two frames exist (the period is undefined).
    pub fn frame_period(&self) -> Option<f32> {
        if self.time_axis.len() >= 2 {
            Some(self.time_axis[1] - self.time_axis[0])
        } else {
            None
        }
    }

    /// Scale all magnitudes so the global maximum becomes 1.0
    ///
    /// An all-zero grid is left untouched (no division by zero); zero stays
    /// a meaningful "no energy" value throughout the pipeline.
    pub fn normalize(&mut self) {
        let global_max = self
            .magnitude
            .iter()
            .flat_map(|row| row.iter().copied())
            .fold(0.0f32, f32::max);

        if global_max > 0.0 {
            for row in &mut self.magnitude {
                for v in row.iter_mut() {
                    *v /= global_max;
                }
            }
        }
    }
}
