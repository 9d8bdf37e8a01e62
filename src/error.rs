use thiserror::Error;

/// I/O errors that can occur when reading from the serving root
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// File does not exist, is not a regular file, or resolves outside the root
    #[error("File not found: {0}")]
    NotFound(String),

    /// Filesystem error while reading an existing file
    #[error("Read error on {path}: {message}")]
    Read { path: String, message: String },
}

/// Errors produced while serving a file slice.
///
/// Every variant carries the message that is shown on the error page, except
/// [`SliceError::Internal`], whose detail is only logged.
#[derive(Debug, Clone, Error)]
pub enum SliceError {
    /// Requested file is missing
    #[error("File not found.")]
    NotFound { filename: String },

    /// Malformed or contradictory line-range input
    #[error("{message}")]
    Validation { message: String },

    /// Start line lies beyond the end of the file
    #[error("Start line out of range.")]
    StartOutOfRange { start_line: usize, total_lines: usize },

    /// An explicit range selected nothing but whitespace
    #[error("No content found between start line and end line.")]
    EmptyRange { start_line: usize, end_line: usize },

    /// Bytes are not valid under the detected encoding
    #[error("Error decoding file with detected encoding: {encoding}")]
    Decode { encoding: &'static str },

    /// Any other failure; `detail` is never rendered
    #[error("An error occurred: the file could not be read")]
    Internal { detail: String },
}

impl SliceError {
    /// Create a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        SliceError::Validation {
            message: message.into(),
        }
    }
}

impl From<IoError> for SliceError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::NotFound(filename) => SliceError::NotFound { filename },
            IoError::Read { .. } => SliceError::Internal {
                detail: err.to_string(),
            },
        }
    }
}
