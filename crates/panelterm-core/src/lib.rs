#![forbid(unsafe_code)]

//! Screen reconstruction for instrument console captures.
//!
//! `panelterm-core` turns the raw byte stream of a legacy instrument's serial
//! console (printable text interleaved with VT100 escape sequences) into the
//! two-dimensional screen a real terminal would have shown. Consoles redraw
//! fixed-format status panels in place by absolute cursor positioning, so the
//! raw stream is a jumble of overlapping fragments; the reconstructed screen
//! is the boxed panel the operator sees.
//!
//! # Primary responsibilities
//!
//! - **Parser**: byte-level state machine for the VT100 subset consoles emit.
//! - **Screen**: fixed-width, downward-growing grid plus cursor and charset.
//! - **Charset**: DEC line-drawing substitution for box glyphs.
//! - **Terminal**: single-pass driver from bytes to rendered text.
//!
//! # Design principles
//!
//! - **No I/O**: all types are pure data + logic; the caller supplies bytes.
//! - **Deterministic**: identical byte sequences always produce identical text,
//!   regardless of how the input is chunked.
//! - **Infallible**: malformed input is clamped or ignored, never an error.
//!
//! ```
//! use panelterm_core::render_capture;
//!
//! let text = render_capture(b"\x1b[2J\x1b[2;3H\x1b(0lqk\x1b(B", 80, 24);
//! assert_eq!(text, "\n  ┌─┐\n");
//! ```

pub mod cell;
pub mod charset;
pub mod config;
pub mod cursor;
pub mod grid;
pub mod logging;
pub mod parser;
pub mod screen;
pub mod terminal;

pub use cell::Cell;
pub use charset::{Charset, line_drawing_glyph};
pub use config::{ScreenConfig, ScreenConfigError, ScreenConfigParse};
pub use cursor::Cursor;
pub use grid::Grid;
pub use parser::{Action, Parser};
pub use screen::Screen;
pub use terminal::{Terminal, render_capture};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
