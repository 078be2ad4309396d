//! Parse-and-render driver.
//!
//! [`Terminal`] pairs a [`Parser`] with the [`Screen`] it drives. Each parsed
//! action is applied to the screen as soon as it is recognized, so a capture
//! is processed in a single left-to-right pass with no backtracking. A
//! terminal is meant to live for one capture: build it, feed the bytes,
//! render, drop it.

use crate::config::ScreenConfig;
use crate::parser::{Action, Parser};
use crate::screen::Screen;

/// In-memory console terminal: parser + screen.
#[derive(Debug, Clone, Default)]
pub struct Terminal {
    parser: Parser,
    screen: Screen,
}

impl Terminal {
    /// Create a terminal with a blank screen of `cols` × `rows`.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            parser: Parser::new(),
            screen: Screen::new(cols, rows),
        }
    }

    /// Create a terminal sized by `config`.
    pub fn with_config(config: &ScreenConfig) -> Self {
        Self {
            parser: Parser::new(),
            screen: Screen::with_config(config),
        }
    }

    /// Feed raw console bytes.
    ///
    /// May be called repeatedly; a sequence split across calls is completed
    /// by the next call.
    pub fn feed(&mut self, bytes: &[u8]) {
        let span = crate::debug_span!("terminal.feed", len = bytes.len());
        let _guard = span.enter();
        for &b in bytes {
            if let Some(action) = self.parser.advance(b) {
                self.apply(&action);
            }
        }
    }

    fn apply(&mut self, action: &Action) {
        if matches!(action, Action::Escape(_) | Action::Sgr(_)) {
            crate::trace!(?action, "sequence has no screen effect");
        }
        self.screen.apply(action);
    }

    /// Whether the input so far ended part-way through a sequence.
    ///
    /// Such a tail has had no effect on the screen.
    pub fn is_mid_sequence(&self) -> bool {
        self.parser.in_sequence()
    }

    /// The screen being driven.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Consume the terminal, keeping only its screen.
    pub fn into_screen(self) -> Screen {
        if self.parser.in_sequence() {
            crate::debug!("capture ended mid-sequence; partial sequence discarded");
        }
        self.screen
    }

    /// Render the screen to text (see [`Screen::render`]).
    pub fn render(&self) -> String {
        self.screen.render()
    }
}

/// Reconstruct the screen for a complete capture and render it.
///
/// This is the whole pipeline in one call: fresh screen of `cols` × `rows`,
/// single pass over `bytes`, render.
pub fn render_capture(bytes: &[u8], cols: usize, rows: usize) -> String {
    let mut terminal = Terminal::new(cols, rows);
    terminal.feed(bytes);
    terminal.render()
}
