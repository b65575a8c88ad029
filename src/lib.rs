//! # Pianoscribe
//!
//! A note-onset extraction engine for piano recordings: it turns a
//! time-frequency magnitude surface (spectrogram) into a sequence of
//! discrete, timestamped, pitch-labeled note-onset events over the 88
//! piano keys.
//!
//! ## Features
//!
//! - **Onset detection**: per-pitch onset-strength signals with
//!   prominence-aware peak picking and same-pitch distance gating
//! - **Harmonic suppression**: near-simultaneous weak detections caused by
//!   a single note's harmonic series are filtered out
//! - **STFT front end**: Hann-windowed magnitude spectrogram from raw
//!   samples, tuned for low-key frequency resolution
//! - **MIDI pipeline**: symbolic note extraction from Standard MIDI Files
//!   with a tempo-aware clock
//!
//! ## Quick Start
//!
//! ```no_run
//! use pianoscribe::{extract_from_samples, ExtractionConfig};
//!
//! // Mono samples, normalized to [-1.0, 1.0]
//! let samples: Vec<f32> = vec![];
//! let sample_rate = 44100;
//!
//! let events = extract_from_samples(&samples, sample_rate, &ExtractionConfig::default())?;
//! for event in &events {
//!     println!("{:.3}s {} (magnitude {:.2})", event.time, event.note_name, event.magnitude);
//! }
//! # Ok::<(), pianoscribe::ExtractionError>(())
//! ```
//!
//! ## Architecture
//!
//! The extraction pipeline follows this flow:
//!
//! ```text
//! Samples → STFT → Spectrogram → Per-Pitch Onset Detection → Harmonic Resolution → Note Events
//! ```
//!
//! The spectrogram-level entry point is
//! [`extract_note_events`](detection::extract_note_events); the core never
//! performs I/O and is a pure, synchronous computation over immutable
//! inputs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod detection;
pub mod error;
pub mod io;
pub mod midi;
pub mod pitch;
pub mod result;
pub mod transform;

// Re-export main types
pub use config::ExtractionConfig;
pub use detection::extract_note_events;
pub use error::ExtractionError;
pub use result::{ExtractionSummary, NoteEvent};

/// Extract note-onset events from raw audio samples
///
/// Convenience entry point: computes the magnitude spectrogram with the
/// configured STFT parameters, then runs the detection pipeline over it.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `config` - Extraction configuration parameters
///
/// # Returns
///
/// Note events in non-decreasing time order. Audio shorter than one STFT
/// window yields an empty list.
///
/// # Errors
///
/// Returns `ExtractionError` if the configuration is structurally invalid
/// (zero window or hop size, zero sample rate).
///
/// # Example
///
/// ```no_run
/// use pianoscribe::{extract_from_samples, ExtractionConfig};
///
/// let samples = vec![0.0f32; 44100 * 10]; // 10 seconds of silence
/// let events = extract_from_samples(&samples, 44100, &ExtractionConfig::default())?;
/// assert!(events.is_empty());
/// # Ok::<(), pianoscribe::ExtractionError>(())
/// ```
pub fn extract_from_samples(
    samples: &[f32],
    sample_rate: u32,
    config: &ExtractionConfig,
) -> Result<Vec<NoteEvent>, ExtractionError> {
    log::debug!(
        "Extracting notes from {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let spectrogram =
        transform::compute_spectrogram(samples, sample_rate, config.window_size, config.hop_size)?;

    detection::extract_note_events(&spectrogram, config)
}
