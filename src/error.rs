//! Error types for the TETR.IO client library.

use thiserror::Error;

/// Number of body bytes kept from a non-200 response for diagnostics.
pub const MAX_ERROR_BODY: usize = 4096;

/// The main error type for all TETR.IO client operations.
#[derive(Error, Debug)]
pub enum TetrioError {
    /// The caller's context was cancelled or its deadline passed.
    #[error("operation cancelled")]
    Cancelled,

    /// The server answered with a non-200 status.
    #[error("non 200 status, {status}: {}", preview(content))]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Status line, headers and a truncated body, as received.
        content: Vec<u8>,
    },

    /// HTTP request failed before a status was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The response did not match the envelope or payload shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The envelope reported `success: false`.
    ///
    /// Displays as the server's error string, unmodified.
    #[error("{0}")]
    Remote(RemoteError),

    /// The looked up username does not exist.
    #[error("no such user: {username:?}")]
    NoSuchUser {
        /// The username that was requested.
        username: String,
        /// The server error this was derived from.
        #[source]
        source: RemoteError,
    },

    /// No user is linked to the searched external id.
    #[error("no linked user found for external id {id}")]
    NoLinkedUser {
        /// The external id that was searched.
        id: String,
    },

    /// Both participants of a match report the same outcome.
    #[error("record has no winner or loser")]
    AmbiguousRecord,

    /// A match record that is not a two player league game.
    #[error("not a multiplayer record")]
    NotMultiplayerRecord,

    /// Rank cutoffs need at least one leaderboard entry.
    #[error("not enough leaderboard entries to compute cutoffs")]
    InsufficientData,

    /// A leaderboard whose ratings are not in descending order.
    #[error("leaderboard is not sorted by rating (entry {index} rates above its predecessor)")]
    UnorderedSnapshot {
        /// Index of the first entry rated higher than the one before it.
        index: usize,
    },

    /// Username rejected before any request was made.
    #[error("username too long ({len} bytes, max {max})")]
    InvalidUsername {
        /// Length of the rejected username.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// A league history uid that is not 24 hex digits.
    #[error("invalid history uid: {0:?}")]
    InvalidUid(String),

    /// The history source has nothing for this uid.
    #[error("no league history found for {0}")]
    HistoryNotFound(String),

    /// Reading or writing the persisted leaderboard failed.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<serde_json::Error> for TetrioError {
    fn from(err: serde_json::Error) -> Self {
        TetrioError::Malformed(err.to_string())
    }
}

impl From<csv::Error> for TetrioError {
    fn from(err: csv::Error) -> Self {
        TetrioError::Malformed(format!("history csv: {err}"))
    }
}

/// Closed classification of [`TetrioError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller-driven abort of a wait or a request.
    Cancelled,
    /// Network failure or a non-success HTTP status.
    Transport,
    /// Bytes that do not match the expected shape.
    Malformed,
    /// Unclassified server-reported failure.
    Remote,
    /// Username lookup miss.
    NoSuchUser,
    /// External id search miss.
    NoLinkedUser,
    /// Match record with no single winner.
    AmbiguousRecord,
    /// Match record that is not a league game.
    NotMultiplayerRecord,
    /// Too little data for a derived view.
    InsufficientData,
    /// Input rejected locally.
    InvalidInput,
    /// The requested resource does not exist.
    NotFound,
    /// Local file system failure.
    Io,
}

impl TetrioError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TetrioError::Cancelled => ErrorKind::Cancelled,
            TetrioError::Transport { .. }
            | TetrioError::Http(_)
            | TetrioError::HttpMiddleware(_) => ErrorKind::Transport,
            TetrioError::Malformed(_) | TetrioError::UnorderedSnapshot { .. } => {
                ErrorKind::Malformed
            }
            TetrioError::Remote(_) => ErrorKind::Remote,
            TetrioError::NoSuchUser { .. } => ErrorKind::NoSuchUser,
            TetrioError::NoLinkedUser { .. } => ErrorKind::NoLinkedUser,
            TetrioError::AmbiguousRecord => ErrorKind::AmbiguousRecord,
            TetrioError::NotMultiplayerRecord => ErrorKind::NotMultiplayerRecord,
            TetrioError::InsufficientData => ErrorKind::InsufficientData,
            TetrioError::InvalidUsername { .. }
            | TetrioError::InvalidUid(_)
            | TetrioError::Url(_) => ErrorKind::InvalidInput,
            TetrioError::HistoryNotFound(_) => ErrorKind::NotFound,
            TetrioError::Io(_) => ErrorKind::Io,
        }
    }

    /// Check if this error came from the caller's context.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TetrioError::Cancelled)
    }

    /// The HTTP status, for [`TetrioError::Transport`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            TetrioError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn preview(content: &[u8]) -> String {
    let end = content.len().min(64);
    format!("{:?}...", String::from_utf8_lossy(&content[..end]))
}

/// An error string reported by the API in a `success: false` envelope.
///
/// The API has no error codes, only free-form messages. Matching on
/// [`error_phrases`] is best effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    message: String,
}

impl RemoteError {
    /// Create a remote error from the server's message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The server's message, verbatim.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Case-insensitive substring match against the message.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        self.message
            .to_lowercase()
            .contains(&phrase.to_lowercase())
    }

    /// Check if this is the user lookup miss.
    pub fn is_no_such_user(&self) -> bool {
        self.contains_phrase(error_phrases::NO_SUCH_USER)
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RemoteError {}

/// Known server phrases used for reclassifying [`RemoteError`]s.
pub mod error_phrases {
    /// Returned by `/users/<name>` for unknown usernames.
    pub const NO_SUCH_USER: &str = "no such user";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_verbatim() {
        let err = TetrioError::Remote(RemoteError::new("some text"));
        assert_eq!(err.to_string(), "some text");
        assert_eq!(err.kind(), ErrorKind::Remote);
    }

    #[test]
    fn test_no_such_user_phrase_is_case_insensitive() {
        assert!(RemoteError::new("No such user! | Either you mistyped something").is_no_such_user());
        assert!(!RemoteError::new("rate limited").is_no_such_user());
    }

    #[test]
    fn test_transport_display_is_bounded() {
        let err = TetrioError::Transport {
            status: 502,
            content: vec![b'x'; MAX_ERROR_BODY],
        };
        let text = err.to_string();
        assert!(text.starts_with("non 200 status, 502"));
        assert!(text.len() < 128);
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_json_errors_are_malformed() {
        let err: TetrioError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }
}
