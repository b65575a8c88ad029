//! Piano pitch reference modules
//!
//! The 88-key equal-temperament pitch table and the mapping from pitch
//! frequencies onto the bins of an arbitrary spectral frequency axis.

pub mod mapping;
pub mod table;

pub use mapping::map_pitches_to_bins;
pub use table::{Pitch, PitchTable, PIANO_KEYS};
