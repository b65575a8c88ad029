//! Spectral transform modules
//!
//! The `Spectrogram` input type consumed by the detection pipeline, and a
//! short-time Fourier transform that produces one from raw samples.

pub mod spectrogram;
pub mod stft;

pub use spectrogram::Spectrogram;
pub use stft::compute_spectrogram;
