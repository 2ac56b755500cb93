//! Error types for the encoding pipeline

use thiserror::Error;

/// Failures that abort a walk run.
///
/// Comment lines and unrecognised symbols are not errors; they are handled
/// inline by the reader and the encoder.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("No input file was specified. Select a file before drawing.")]
    MissingInput,

    #[error("Invalid setting '{field}': {message}")]
    InvalidSetting { field: String, message: String },

    #[error("Failed to read chunk {chunk}: {source}")]
    ReadFailure {
        chunk: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WalkError {
    pub fn invalid_setting<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidSetting {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn read_failure(chunk: usize, source: std::io::Error) -> Self {
        Self::ReadFailure { chunk, source }
    }
}

pub type WalkResult<T> = Result<T, WalkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = WalkError::invalid_setting("point_offset", "must be at least 1");
        assert_eq!(err.to_string(), "Invalid setting 'point_offset': must be at least 1");

        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err = WalkError::read_failure(3, io);
        assert!(err.to_string().starts_with("Failed to read chunk 3"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
