// src/error.rs
//! Error types for sentence decoding and the surrounding tooling

use std::fmt;

pub type Result<T> = std::result::Result<T, GpsError>;

#[derive(Debug)]
pub enum GpsError {
    /// Sentence does not begin with the `$` marker.
    MalformedSentence(String),
    /// The `*HH` token does not match the computed XOR checksum.
    ChecksumMismatch { expected: u8, found: String },
    /// No `*HH` token on a sentence whose decoder requires one.
    MissingChecksum(String),
    /// Neither the built-in table nor the custom registry claims the tag.
    UnsupportedSentenceType(String),
    /// A decoder rejected the sentence before touching any state.
    InsufficientFields { tag: String, required: usize, found: usize },
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(String),
    Other(String),
}

impl GpsError {
    /// True for the structural failures reported by the sentence dispatcher.
    pub fn is_sentence_error(&self) -> bool {
        matches!(
            self,
            GpsError::MalformedSentence(_)
                | GpsError::ChecksumMismatch { .. }
                | GpsError::MissingChecksum(_)
                | GpsError::UnsupportedSentenceType(_)
                | GpsError::InsufficientFields { .. }
        )
    }
}

impl fmt::Display for GpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsError::MalformedSentence(s) => {
                write!(f, "Invalid sentence (must begin with '$'): {}", s)
            }
            GpsError::ChecksumMismatch { expected, found } => {
                write!(f, "Checksum mismatch: expected {:02X}, found {}", expected, found)
            }
            GpsError::MissingChecksum(s) => write!(f, "Missing checksum: {}", s),
            GpsError::UnsupportedSentenceType(tag) => {
                write!(f, "Sentence type not supported: {}", tag)
            }
            GpsError::InsufficientFields { tag, required, found } => write!(
                f,
                "Insufficient fields in {}: need {}, found {}",
                tag, required, found
            ),
            GpsError::Io(e) => write!(f, "IO error: {}", e),
            GpsError::Json(e) => write!(f, "JSON error: {}", e),
            GpsError::Config(msg) => write!(f, "Config error: {}", msg),
            GpsError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for GpsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpsError::Io(e) => Some(e),
            GpsError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GpsError {
    fn from(error: std::io::Error) -> Self {
        GpsError::Io(error)
    }
}

impl From<serde_json::Error> for GpsError {
    fn from(error: serde_json::Error) -> Self {
        GpsError::Json(error)
    }
}

impl From<anyhow::Error> for GpsError {
    fn from(error: anyhow::Error) -> Self {
        GpsError::Other(error.to_string())
    }
}
