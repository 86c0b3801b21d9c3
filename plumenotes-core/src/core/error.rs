//! Error types for the Plume Notes core library.

use thiserror::Error;

/// All errors that can occur within the Plume Notes core library.
///
/// Both variants describe persistence failures: `Io` covers unreadable or
/// unwritable files and missing permissions, `Json` covers a data file that
/// exists but cannot be parsed. No error here is fatal to the process; the
/// session controller degrades to an in-memory collection and reports the
/// failure through its error message.
#[derive(Debug, Error)]
pub enum PlumenotesError {
    /// An I/O operation on the notes file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored note data could not be deserialized from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`PlumenotesError`].
pub type Result<T> = std::result::Result<T, PlumenotesError>;

impl PlumenotesError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(_) => "The notes file is damaged and could not be read".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = PlumenotesError::from(io);
        assert!(e.to_string().contains("denied"));
    }

    #[test]
    fn test_json_user_message_does_not_leak_parser_detail() {
        let bad: std::result::Result<Vec<i32>, _> = serde_json::from_str("not json");
        let e = PlumenotesError::from(bad.unwrap_err());
        assert_eq!(
            e.user_message(),
            "The notes file is damaged and could not be read"
        );
    }
}
