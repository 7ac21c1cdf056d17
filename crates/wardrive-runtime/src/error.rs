use std::fmt;
use std::path::PathBuf;

/// Result type for wardrive-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a run or a runtime operation
#[derive(Debug)]
pub enum Error {
    /// Capture discovery or reading failed
    Provider(wardrive_providers::Error),

    /// Vendor table or cache error
    Core(wardrive_core::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Output serialization failed
    Json(serde_json::Error),

    /// Configuration error
    Config(String),

    /// The data directory does not exist
    InputDirMissing(PathBuf),

    /// The data directory holds no capture files
    NoInputFiles(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Provider(err) => write!(f, "Provider error: {}", err),
            Error::Core(err) => write!(f, "Vendor table error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::InputDirMissing(path) => {
                write!(f, "Data directory not found: {}", path.display())
            }
            Error::NoInputFiles(path) => {
                write!(f, "No CSV capture files found in {}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Provider(err) => Some(err),
            Error::Core(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Config(_) | Error::InputDirMissing(_) | Error::NoInputFiles(_) => None,
        }
    }
}

impl From<wardrive_providers::Error> for Error {
    fn from(err: wardrive_providers::Error) -> Self {
        Error::Provider(err)
    }
}

impl From<wardrive_core::Error> for Error {
    fn from(err: wardrive_core::Error) -> Self {
        Error::Core(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
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
