//! Client Error Types
//!
//! Every failure talking to the backend ends up as a [`ClientError`] whose
//! `Display` is fit to show to a user.

use thiserror::Error;

use crate::forms::ValidationError;
use crate::session::SessionError;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Cannot reach the recipe server at {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response; the message is the backend's `detail` or a fallback
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_message() {
        let err = ClientError::Api {
            status: 401,
            message: "Incorrect email or password".to_string(),
        };
        assert_eq!(err.to_string(), "Incorrect email or password");
        assert!(err.is_unauthorized());
        assert!(!err.is_not_found());
    }
}
