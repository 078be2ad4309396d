#![forbid(unsafe_code)]

//! Capture-file tooling built on `panelterm-core`.
//!
//! A capture is the raw byte stream recorded from an instrument's serial
//! console. This crate loads captures from disk, reconstructs their screen,
//! reads named fields off the panel, and appends readings to a log.
//!
//! # Modules
//!
//! - [`readback`] - Positional field extraction from a reconstructed screen.
//! - [`log_record`] - Timestamped JSON log lines.
//! - [`error`] - [`CaptureError`].

pub mod error;
pub mod log_record;
pub mod readback;

use std::path::Path;

use panelterm_core::{Screen, ScreenConfig, Terminal};

pub use error::CaptureError;
pub use readback::{FieldSpec, Readback, ReadbackProfile};

/// A reconstructed capture.
#[derive(Debug, Clone)]
pub struct Capture {
    screen: Screen,
    truncated: bool,
}

impl Capture {
    /// Reconstruct the screen for `bytes`.
    pub fn from_bytes(bytes: &[u8], config: &ScreenConfig) -> Self {
        let mut terminal = Terminal::with_config(config);
        terminal.feed(bytes);
        let truncated = terminal.is_mid_sequence();
        if truncated {
            tracing::warn!(len = bytes.len(), "capture ends mid escape sequence");
        }
        Self {
            screen: terminal.into_screen(),
            truncated,
        }
    }

    /// Read `path` and reconstruct its screen.
    ///
    /// `config` is validated first; zero dimensions are rejected.
    pub fn load(path: &Path, config: &ScreenConfig) -> Result<Self, CaptureError> {
        config.validate()?;
        let bytes = std::fs::read(path).map_err(|e| CaptureError::io(path, e))?;
        tracing::debug!(path = %path.display(), len = bytes.len(), "loaded capture");
        Ok(Self::from_bytes(&bytes, config))
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Whether the capture was cut off inside an escape sequence.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Rendered screen text.
    pub fn render(&self) -> String {
        self.screen.render()
    }

    /// Read `profile`'s fields, warning about any that are blank.
    pub fn readback(&self, profile: &ReadbackProfile) -> Readback {
        let readback = profile.extract(&self.screen);
        for name in readback.missing() {
            tracing::warn!(field = name, "field not drawn; data not ready");
        }
        readback
    }
}
