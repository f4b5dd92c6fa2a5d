use thiserror::Error;

/// Service error code reported when the request rate limit is exhausted.
pub const RATE_LIMIT_ERROR_CODE: &str = "TooManyRequestsException";

/// HTTP status the service uses when a name or identifier resolves to nothing.
pub const NO_CONTENT_STATUS: u16 = 204;

/// Result type for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Failures reported by a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The service answered with a non-success status or an error document.
    #[error("request failed with status {status}{}", describe_service_error(.error_code, .error_message))]
    Status {
        /// HTTP status code
        status: u16,
        /// Service-specific error code, e.g. `TooManyRequestsException`
        error_code: Option<String>,
        /// Human readable message accompanying the error code
        error_message: Option<String>,
    },

    /// The request never produced a response (connection, TLS, DNS, bad URL).
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not a JSON document.
    #[error("response decode error: {0}")]
    Decode(String),

    /// No response arrived within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The caller's cancellation signal fired first.
    #[error("request cancelled")]
    Cancelled,
}

impl TransportError {
    /// Shorthand for a status failure without a service error document.
    pub fn status(status: u16) -> Self {
        Self::Status {
            status,
            error_code: None,
            error_message: None,
        }
    }

    /// Status failure carrying a service error code and message.
    pub fn service(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            error_code: Some(code.into()),
            error_message: Some(message.into()),
        }
    }
}

fn describe_service_error(code: &Option<String>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!(" ({code}: {message})"),
        (Some(code), None) => format!(" ({code})"),
        (None, Some(message)) => format!(" ({message})"),
        (None, None) => String::new(),
    }
}

/// Domain error taxonomy for profile operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// No profile matches the name or identifier. Demo accounts report this too.
    #[error("no such profile")]
    NoSuchProfile,

    /// The service refused the request with `TooManyRequestsException`.
    #[error("request rate limit exceeded")]
    RateLimited,

    /// A batch load asked for more than [`LOAD_MANY_MAX_SIZE`](crate::LOAD_MANY_MAX_SIZE) names.
    #[error("aggregate request size of {0} exceeded maximum of {max}", max = crate::LOAD_MANY_MAX_SIZE)]
    TooManyRequested(usize),

    /// A document, event list or texture attachment had an unexpected shape.
    #[error("failed to parse {context}: {reason}")]
    Parse {
        /// What was being decoded
        context: String,
        /// Why decoding failed
        reason: String,
    },

    /// Any other transport failure, passed through unchanged.
    #[error(transparent)]
    Transport(TransportError),
}

impl ProfileError {
    pub(crate) fn parse(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// True for failures the caller may retry after backing off.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

/// Maps a transport failure onto the domain taxonomy.
///
/// A rate-limit error code wins over the status code. A no-content status means
/// the queried name or identifier currently resolves to nothing. Everything else
/// is handed back untouched.
pub fn classify(err: TransportError) -> ProfileError {
    match &err {
        TransportError::Status {
            error_code: Some(code),
            ..
        } if code == RATE_LIMIT_ERROR_CODE => ProfileError::RateLimited,
        TransportError::Status { status, .. } if *status == NO_CONTENT_STATUS => {
            ProfileError::NoSuchProfile
        }
        _ => ProfileError::Transport(err),
    }
}

impl From<TransportError> for ProfileError {
    fn from(err: TransportError) -> Self {
        classify(err)
    }
}
