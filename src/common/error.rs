use thiserror::Error;

#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Malformed bootstrap entry, or no entry could be resolved.
    #[error("config error: {0}")]
    Config(String),

    /// Caller passed a value outside the accepted set (e.g. an unknown DNS lookup strategy).
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    #[error("host not found: {host}")]
    HostNotFound { host: String },

    /// Resolver backend failure other than "no such host".
    #[error("DNS resolution failed for {host}: {reason}")]
    Dns { host: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BootstrapError {
    pub fn config(msg: impl Into<String>) -> Self {
        BootstrapError::Config(msg.into())
    }

    pub fn host_not_found(host: impl Into<String>) -> Self {
        BootstrapError::HostNotFound { host: host.into() }
    }

    /// Whether the same call may succeed later without a config change.
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Whether this error is a permanent failure (no point retrying).
    pub fn is_permanent(&self) -> bool {
        self.kind().is_permanent()
    }

    /// Get the kind/category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BootstrapError::Config(_) => ErrorKind::Config,
            BootstrapError::IllegalArgument(_) => ErrorKind::IllegalArgument,
            BootstrapError::HostNotFound { .. } => ErrorKind::HostNotFound,
            BootstrapError::Dns { .. } => ErrorKind::Dns,
            BootstrapError::Io(_) => ErrorKind::Io,
        }
    }
}

/// Lightweight error category for pattern matching without borrowing the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    IllegalArgument,
    HostNotFound,
    Dns,
    Io,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::HostNotFound | ErrorKind::Dns | ErrorKind::Io)
    }

    pub fn is_permanent(self) -> bool {
        matches!(self, ErrorKind::Config | ErrorKind::IllegalArgument)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::IllegalArgument => "ILLEGAL_ARGUMENT",
            ErrorKind::HostNotFound => "HOST_NOT_FOUND",
            ErrorKind::Dns => "DNS_FAILED",
            ErrorKind::Io => "IO",
        }
    }
}

pub type Result<T, E = BootstrapError> = std::result::Result<T, E>;
