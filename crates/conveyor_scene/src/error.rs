//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Configuration and geometry errors are fatal and raised before any scene
//! work; asset and capability errors are recovered by the callers that
//! encounter them; render errors abort a batch but preserve frames already
//! written to disk.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid geometry: {what} = {value}")]
    InvalidGeometry { what: String, value: f32 },

    #[error("asset not found: '{name}'")]
    AssetNotFound { name: String },

    #[error("capability '{input}' unavailable under host version {version}")]
    CapabilityUnavailable { input: String, version: String },

    #[error("render failed at frame {frame}: {message}")]
    Render { frame: u32, message: String },

    #[error("unknown frame index {frame} (timeline has {len} frames)")]
    UnknownFrame { frame: u32, len: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Convenience constructor for [`Error::InvalidGeometry`].
    pub fn invalid_geometry(what: impl Into<String>, value: f32) -> Self {
        Error::InvalidGeometry {
            what: what.into(),
            value,
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_geometry_reports_offending_value() {
        let err = Error::invalid_geometry("camera distance", -0.5);
        let msg = err.to_string();
        assert!(msg.contains("camera distance"));
        assert!(msg.contains("-0.5"));
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }
}
