//! Error types for the note extraction engine

use std::fmt;

/// Errors that can occur during note extraction
#[derive(Debug, Clone)]
pub enum ExtractionError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Audio or MIDI decoding error
    DecodingError(String),

    /// Processing error during extraction
    ProcessingError(String),

    /// Numerical error (overflow, underflow, etc.)
    NumericalError(String),
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ExtractionError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            ExtractionError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            ExtractionError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for ExtractionError {}
