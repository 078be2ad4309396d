//! Error type for capture tooling.

use std::io;
use std::path::PathBuf;

use panelterm_core::ScreenConfigError;

/// Errors raised while loading captures, reading fields, or writing records.
#[derive(Debug)]
pub enum CaptureError {
    /// Reading or writing a file failed.
    Io { path: PathBuf, source: io::Error },
    /// A `NAME=ROW:COL:WIDTH` field spec could not be parsed.
    InvalidFieldSpec { spec: String, reason: &'static str },
    /// Readback could not be serialized.
    Json(serde_json::Error),
    /// The log timestamp could not be formatted.
    Timestamp(time::error::Format),
    /// Screen dimensions failed validation.
    Config(Vec<ScreenConfigError>),
}

impl CaptureError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn field_spec(spec: &str, reason: &'static str) -> Self {
        Self::InvalidFieldSpec {
            spec: spec.to_string(),
            reason,
        }
    }
}

impl core::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::InvalidFieldSpec { spec, reason } => {
                write!(f, "invalid field spec {spec:?}: {reason}")
            }
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Timestamp(e) => write!(f, "timestamp error: {e}"),
            Self::Config(errors) => {
                write!(f, "invalid screen config: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            Self::Timestamp(e) => Some(e),
            Self::InvalidFieldSpec { .. } | Self::Config(_) => None,
        }
    }
}

impl From<serde_json::Error> for CaptureError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<time::error::Format> for CaptureError {
    fn from(e: time::error::Format) -> Self {
        Self::Timestamp(e)
    }
}

impl From<Vec<ScreenConfigError>> for CaptureError {
    fn from(errors: Vec<ScreenConfigError>) -> Self {
        Self::Config(errors)
    }
}
