use std::fmt;

/// Result type for folio-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the controller layer
#[derive(Debug)]
pub enum Error {
    /// Backend request failed; `message` is what the screen shows
    Api {
        message: String,
        source: folio_client::Error,
    },

    /// Attachment could not be read
    Attachment(folio_types::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// A required field is blank
    Required(&'static str),

    /// A submit is already in flight
    Busy,

    /// The controller task is gone
    Closed,
}

impl Error {
    /// Wrap a client error with the text a screen displays for it.
    pub fn api(source: folio_client::Error, fallback: &str) -> Self {
        Error::Api {
            message: source.user_message(fallback),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api { message, .. } => write!(f, "{}", message),
            Error::Attachment(err) => write!(f, "Attachment error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Required(field) => write!(f, "{} is required", field),
            Error::Busy => write!(f, "A submit is already in progress"),
            Error::Closed => write!(f, "Controller stopped"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Api { source, .. } => Some(source),
            Error::Attachment(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) | Error::Required(_) | Error::Busy | Error::Closed => None,
        }
    }
}

impl From<folio_types::Error> for Error {
    fn from(err: folio_types::Error) -> Self {
        Error::Attachment(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
