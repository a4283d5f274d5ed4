use std::io;

// Errors raised while driving the console surface.
#[derive(Debug)]
pub enum PlatformError {
    Io(io::Error),
    // The event handler mutex was poisoned by a panicking handler.
    HandlerUnavailable,
}

impl From<io::Error> for PlatformError {
    fn from(err: io::Error) -> Self {
        PlatformError::Io(err)
    }
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::Io(e) => write!(f, "Console I/O error: {e}"),
            PlatformError::HandlerUnavailable => write!(f, "Event handler is unavailable"),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlatformError::Io(e) => Some(e),
            PlatformError::HandlerUnavailable => None,
        }
    }
}

/// A specialized `Result` type for platform layer operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
