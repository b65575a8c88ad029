//! Audio decoding using Symphonia

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::i24;
use symphonia::default::get_probe;

use crate::error::ExtractionError;

/// Convert i24 to f32.
fn i24_to_f32(sample: i24) -> f32 {
    sample.inner() as f32
}

/// Decode an audio file to mono PCM samples
///
/// Probes the container format (using the file extension as a hint),
/// decodes the first non-null audio track, and mixes all channels down to
/// mono by averaging.
///
/// # Arguments
///
/// * `path` - Path to the audio file
///
/// # Returns
///
/// Tuple of (mono samples in [-1.0, 1.0], sample rate in Hz)
///
/// # Errors
///
/// Returns `ExtractionError::DecodingError` if the file cannot be opened,
/// probed, or decoded, or contains no supported audio track.
pub fn decode_audio(path: &str) -> Result<(Vec<f32>, u32), ExtractionError> {
    log::debug!("Decoding audio file: {}", path);

    let src = File::open(path)
        .map_err(|e| ExtractionError::DecodingError(format!("Failed to open {}: {}", path, e)))?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = Path::new(path).extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let meta_opts: MetadataOptions = Default::default();
    let fmt_opts: FormatOptions = Default::default();

    let probed = get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(|e| ExtractionError::DecodingError(format!("Probe failed for {}: {}", path, e)))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| {
            ExtractionError::DecodingError(format!("No supported audio tracks in {}", path))
        })?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.unwrap_or(44100);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| {
            ExtractionError::DecodingError(format!("Failed to create decoder: {}", e))
        })?;

    let mut all_samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream (or unrecoverable container error): stop reading
            Err(_) => break,
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                mix_to_mono(&decoded, &mut all_samples);
            }
            Err(e) => {
                // Skip corrupt packets rather than failing the whole file
                log::warn!("Decode error in {} (skipping packet): {}", path, e);
            }
        }
    }

    if all_samples.is_empty() {
        return Err(ExtractionError::DecodingError(format!(
            "No audio samples decoded from {}",
            path
        )));
    }

    log::debug!(
        "Decoded {} mono samples at {} Hz from {}",
        all_samples.len(),
        sample_rate,
        path
    );

    Ok((all_samples, sample_rate))
}

/// Append one decoded buffer to `out`, averaged down to mono f32
fn mix_to_mono(decoded: &AudioBufferRef<'_>, out: &mut Vec<f32>) {
    let spec = *decoded.spec();
    let channels = spec.channels.count();

    match decoded {
        AudioBufferRef::F32(buf) => {
            if channels == 1 {
                out.extend_from_slice(buf.chan(0));
            } else {
                out.extend((0..buf.frames()).map(|i| {
                    (0..channels).map(|ch| buf.chan(ch)[i]).sum::<f32>() / channels as f32
                }));
            }
        }
        AudioBufferRef::F64(buf) => {
            out.extend((0..buf.frames()).map(|i| {
                (0..channels).map(|ch| buf.chan(ch)[i] as f32).sum::<f32>() / channels as f32
            }));
        }
        AudioBufferRef::S16(buf) => {
            out.extend((0..buf.frames()).map(|i| {
                (0..channels)
                    .map(|ch| buf.chan(ch)[i] as f32 / 32768.0)
                    .sum::<f32>()
                    / channels as f32
            }));
        }
        AudioBufferRef::S24(buf) => {
            out.extend((0..buf.frames()).map(|i| {
                (0..channels)
                    .map(|ch| i24_to_f32(buf.chan(ch)[i]) / 8388608.0)
                    .sum::<f32>()
                    / channels as f32
            }));
        }
        AudioBufferRef::S32(buf) => {
            out.extend((0..buf.frames()).map(|i| {
                (0..channels)
                    .map(|ch| buf.chan(ch)[i] as f32 / 2147483648.0)
                    .sum::<f32>()
                    / channels as f32
            }));
        }
        other => {
            log::warn!(
                "Unsupported sample format {:?}, skipping buffer",
                other.spec()
            );
        }
    }
}
