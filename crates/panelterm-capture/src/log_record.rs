//! Append-only readback log.
//!
//! One line per capture: `YYYY-MM-DD HH:MM:SS: {"field":"value",...}`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::CaptureError;
use crate::readback::Readback;

/// Current time in the local offset, falling back to UTC when the local
/// offset cannot be determined.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Format one log line, including the trailing newline.
pub fn format_record(at: OffsetDateTime, readback: &Readback) -> Result<String, CaptureError> {
    let stamp = at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))?;
    Ok(format!("{stamp}: {}\n", readback.to_json()?))
}

/// Append a record stamped `at` to `path`, creating the file if needed.
pub fn append_record_at(
    path: &Path,
    at: OffsetDateTime,
    readback: &Readback,
) -> Result<(), CaptureError> {
    let line = format_record(at, readback)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CaptureError::io(path, e))?;
    file.write_all(line.as_bytes())
        .map_err(|e| CaptureError::io(path, e))?;
    tracing::debug!(path = %path.display(), "appended readback record");
    Ok(())
}

/// Append a record stamped with the current time.
pub fn append_record(path: &Path, readback: &Readback) -> Result<(), CaptureError> {
    append_record_at(path, now(), readback)
}
