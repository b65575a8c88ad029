//! Short-time Fourier transform
//!
//! Produces a normalized magnitude `Spectrogram` from mono samples using a
//! Hann window and an FFT per frame. Only the one-sided spectrum (bins
//! `0..=n/2`) is kept, since the input is real.
//!
//! # Example
//!
//! ```no_run
//! use pianoscribe::transform::compute_spectrogram;
//!
//! let samples = vec![0.0f32; 44100];
//! let spec = compute_spectrogram(&samples, 44100, 4096, 2048)?;
//! println!("{} bins x {} frames", spec.num_bins(), spec.num_frames());
//! # Ok::<(), pianoscribe::ExtractionError>(())
//! ```

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::ExtractionError;
use crate::transform::Spectrogram;

/// Compute a normalized magnitude spectrogram
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `window_size` - Analysis window length in samples (typically 4096 for
///   piano material, where low-key frequency resolution matters)
/// * `hop_size` - Hop between consecutive frames in samples
///
/// # Returns
///
/// A `Spectrogram` with bin frequencies `k * sample_rate / window_size` for
/// `k = 0..=window_size/2`, frame timestamps at window centers, and
/// magnitudes scaled so the global maximum is 1.0. Audio shorter than one
/// window yields a spectrogram with zero frames.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidInput` if `window_size`, `hop_size`, or
/// `sample_rate` is zero.
pub fn compute_spectrogram(
    samples: &[f32],
    sample_rate: u32,
    window_size: usize,
    hop_size: usize,
) -> Result<Spectrogram, ExtractionError> {
    if window_size == 0 {
        return Err(ExtractionError::InvalidInput(
            "Window size must be > 0".to_string(),
        ));
    }

    if hop_size == 0 {
        return Err(ExtractionError::InvalidInput(
            "Hop size must be > 0".to_string(),
        ));
    }

    if sample_rate == 0 {
        return Err(ExtractionError::InvalidInput(
            "Invalid sample rate".to_string(),
        ));
    }

    let num_bins = window_size / 2 + 1;
    let frequency_axis: Vec<f32> = (0..num_bins)
        .map(|k| k as f32 * sample_rate as f32 / window_size as f32)
        .collect();

    let num_frames = if samples.len() >= window_size {
        (samples.len() - window_size) / hop_size + 1
    } else {
        0
    };

    log::debug!(
        "Computing STFT: {} samples at {} Hz, window={}, hop={}, {} frames",
        samples.len(),
        sample_rate,
        window_size,
        hop_size,
        num_frames
    );

    if num_frames == 0 {
        log::warn!(
            "Audio shorter than one window ({} < {} samples), empty spectrogram",
            samples.len(),
            window_size
        );
        return Spectrogram::new(frequency_axis, vec![], vec![vec![]; num_bins]);
    }

    // Periodic Hann window
    let window: Vec<f32> = (0..window_size)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * i as f32 / window_size as f32;
            0.5 * (1.0 - phase.cos())
        })
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(window_size);

    // Timestamps at window centers
    let time_axis: Vec<f32> = (0..num_frames)
        .map(|i| (i * hop_size + window_size / 2) as f32 / sample_rate as f32)
        .collect();

    // Accumulate per-frame columns, then transpose into [bin][frame] rows
    let mut magnitude = vec![vec![0.0f32; num_frames]; num_bins];
    let mut buffer = vec![Complex::new(0.0f32, 0.0f32); window_size];

    for frame in 0..num_frames {
        let start = frame * hop_size;
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = Complex::new(samples[start + i] * window[i], 0.0);
        }

        fft.process(&mut buffer);

        for (bin, row) in magnitude.iter_mut().enumerate() {
            row[frame] = buffer[bin].norm();
        }
    }

    let mut spectrogram = Spectrogram::new(frequency_axis, time_axis, magnitude)?;
    spectrogram.normalize();

    Ok(spectrogram)
}
