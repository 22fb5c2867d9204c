use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Network failure, timeout, or an unusable request
    Transport(reqwest::Error),
    /// The body was not a readable envelope
    Decode {
        status: u16,
        source: serde_json::Error,
    },
    /// The server answered `success: false` or a non-2xx status
    Rejected { status: u16, message: Option<String> },
    /// An authenticated endpoint was called without a bearer token
    Unauthenticated,
    /// A successful envelope carried no `data`
    MissingData,
}

impl Error {
    /// Text shown to the user for a failed action.
    ///
    /// Only a server-provided message is surfaced; everything else collapses
    /// into the caller's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Rejected { status, .. } | Error::Decode { status, .. } => Some(*status),
            Error::Transport(err) => err.status().map(|s| s.as_u16()),
            Error::Unauthenticated | Error::MissingData => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "Request failed: {}", err),
            Error::Decode { status, source } => {
                write!(f, "Malformed response (HTTP {}): {}", status, source)
            }
            Error::Rejected {
                status,
                message: Some(message),
            } => write!(f, "Rejected by server (HTTP {}): {}", status, message),
            Error::Rejected {
                status,
                message: None,
            } => write!(f, "Rejected by server (HTTP {})", status),
            Error::Unauthenticated => write!(f, "Not signed in"),
            Error::MissingData => write!(f, "Response carried no data"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Decode { source, .. } => Some(source),
            Error::Rejected { .. } | Error::Unauthenticated | Error::MissingData => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = Error::Rejected {
            status: 404,
            message: Some("Blog not found".to_string()),
        };
        assert_eq!(err.user_message("Failed to fetch blog post"), "Blog not found");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = Error::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Failed to fetch blogs"), "Failed to fetch blogs");
        assert_eq!(
            Error::Unauthenticated.user_message("Failed to delete blog post"),
            "Failed to delete blog post"
        );
        assert_eq!(err.status(), Some(500));
    }
}
