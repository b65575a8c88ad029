//! Audio I/O modules
//!
//! Audio container decoding to mono f32 samples using Symphonia.

pub mod decoder;

pub use decoder::decode_audio;
