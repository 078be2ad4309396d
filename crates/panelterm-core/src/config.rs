//! Screen configuration.
//!
//! The only construction options are the initial row count and the fixed
//! column count. Both can come from the environment:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `PANELTERM_ROWS` | `rows` | 40 |
//! | `PANELTERM_COLS` | `cols` | 80 |

use std::env;
use std::fmt;

/// Environment variable overriding the initial row count.
pub const ENV_ROWS: &str = "PANELTERM_ROWS";
/// Environment variable overriding the column count.
pub const ENV_COLS: &str = "PANELTERM_COLS";

/// Default initial row count. Instrument status panels are taller than a
/// classic 24-line terminal, so there is headroom before the screen grows.
pub const DEFAULT_ROWS: usize = 40;
/// Default column count.
pub const DEFAULT_COLS: usize = 80;

/// Screen construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Initial number of rows. The screen grows past this on demand.
    pub rows: usize,
    /// Number of columns, fixed for the lifetime of the screen.
    pub cols: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct ScreenConfigParse {
    pub config: ScreenConfig,
    pub errors: Vec<ScreenConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ScreenConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ScreenConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ScreenConfigError {}

impl ScreenConfig {
    /// Config with explicit dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Parse config from environment variables.
    ///
    /// Invalid values are skipped; use
    /// [`from_env_with_diagnostics`](Self::from_env_with_diagnostics) to see them.
    #[must_use]
    pub fn from_env() -> ScreenConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ScreenConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ScreenConfigError>> {
        let mut errors = Vec::new();
        validate_positive("rows", self.rows, &mut errors);
        validate_positive("cols", self.cols, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn from_env_with<F>(mut get: F) -> ScreenConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = ScreenConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_ROWS) {
        match parse_positive(&value) {
            Some(parsed) => config.rows = parsed,
            None => errors.push(ScreenConfigError::new(
                "rows",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_COLS) {
        match parse_positive(&value) {
            Some(parsed) => config.cols = parsed,
            None => errors.push(ScreenConfigError::new(
                "cols",
                value,
                "expected positive integer",
            )),
        }
    }

    ScreenConfigParse { config, errors }
}

fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|v| *v > 0)
}

fn validate_positive(field: &'static str, value: usize, errors: &mut Vec<ScreenConfigError>) {
    if value == 0 {
        errors.push(ScreenConfigError::new(field, "0", "must be > 0"));
    }
}
