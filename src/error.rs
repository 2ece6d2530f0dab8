use std::fmt;
use std::path::PathBuf;

/// All errors the network, its loaders and its drivers can produce.
///
/// Every variant is a precondition violation: none of them occur under a
/// correct configuration, and none are retried.
#[derive(Debug)]
pub enum NetworkError {
    /// Malformed topology or hyperparameters, caught before training.
    Configuration(String),
    /// The fingerprint line of a weight file names a different topology.
    TopologyMismatch { expected: String, found: String },
    /// A weight file holds a non-numeric token or the wrong number of values.
    MalformedWeights { line: usize, reason: String },
    /// A case file line is short, long, or non-numeric.
    Dataset { line: usize, reason: String },
    /// An input or expected-output vector does not match its layer width.
    Shape { expected: usize, found: usize },
    /// Any of the above, attributed to the file it came from.
    InFile {
        path: PathBuf,
        source: Box<NetworkError>,
    },
    Io(std::io::Error),
    Json(serde_json::Error),
    Image(image::ImageError),
}

impl NetworkError {
    /// Attaches the offending file path to an error.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::TopologyMismatch { expected, found } => write!(
                f,
                "weights were saved for topology '{found}' but the network is '{expected}'"
            ),
            Self::MalformedWeights { line, reason } => {
                write!(f, "malformed weights at line {line}: {reason}")
            }
            Self::Dataset { line, reason } => write!(f, "bad case at line {line}: {reason}"),
            Self::Shape { expected, found } => {
                write!(f, "vector has {found} values but the layer has {expected} units")
            }
            Self::InFile { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Image(e) => write!(f, "image error: {e}"),
        }
    }
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InFile { source, .. } => Some(source.as_ref()),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NetworkError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<image::ImageError> for NetworkError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;
