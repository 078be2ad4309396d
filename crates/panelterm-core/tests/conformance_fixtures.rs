use std::path::{Path, PathBuf};

use panelterm_core::{Cursor, Terminal};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Fixture {
    name: String,
    #[allow(dead_code)]
    description: String,
    /// `[cols, rows]`.
    initial_size: [usize; 2],
    #[serde(default)]
    input: Option<String>,
    /// Raw bytes for captures that are not valid UTF-8.
    #[serde(default)]
    input_bytes_hex: Option<String>,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct Expected {
    cursor: CursorPos,
    #[serde(default)]
    rows: Option<usize>,
    cells: Vec<CellExpectation>,
    #[serde(default)]
    render: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CursorPos {
    row: usize,
    col: usize,
}

#[derive(Debug, Deserialize)]
struct CellExpectation {
    row: usize,
    col: usize,
    #[serde(rename = "char")]
    ch: String,
}

#[test]
fn console_conformance_fixtures_replay() -> Result<(), String> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/conformance");
    let mut paths = collect_fixture_paths(&root)?;
    paths.sort();
    if paths.is_empty() {
        return Err(format!("no fixtures found under {}", root.display()));
    }

    let mut failures = Vec::new();
    for path in paths {
        if let Err(err) = run_fixture(&path) {
            failures.push(format!("{}: {err}", path.display()));
        }
    }

    if !failures.is_empty() {
        return Err(format!(
            "conformance fixtures failed:\n{}",
            failures.join("\n")
        ));
    }

    Ok(())
}

#[test]
fn fixtures_replay_identically_byte_by_byte() -> Result<(), String> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/conformance");
    for path in collect_fixture_paths(&root)? {
        let fixture = load_fixture(&path)?;
        let bytes = fixture_bytes(&fixture)?;
        let [cols, rows] = fixture.initial_size;

        let mut whole = Terminal::new(cols, rows);
        whole.feed(&bytes);
        let mut split = Terminal::new(cols, rows);
        for b in &bytes {
            split.feed(std::slice::from_ref(b));
        }
        if whole.screen() != split.screen() {
            return Err(format!("{}: chunked replay diverged", fixture.name));
        }
    }
    Ok(())
}

fn collect_fixture_paths(root: &Path) -> Result<Vec<PathBuf>, String> {
    let mut out = Vec::new();
    let rd = std::fs::read_dir(root)
        .map_err(|e| format!("failed to read fixture root {}: {e}", root.display()))?;
    for entry in rd.flatten() {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            out.push(path);
        }
    }
    Ok(out)
}

fn load_fixture(path: &Path) -> Result<Fixture, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

fn fixture_bytes(fixture: &Fixture) -> Result<Vec<u8>, String> {
    match (&fixture.input, &fixture.input_bytes_hex) {
        (Some(text), None) => Ok(text.as_bytes().to_vec()),
        (None, Some(hex)) => decode_hex(hex),
        _ => Err(format!(
            "{}: exactly one of input / input_bytes_hex is required",
            fixture.name
        )),
    }
}

fn run_fixture(path: &Path) -> Result<(), String> {
    let fixture = load_fixture(path)?;
    let bytes = fixture_bytes(&fixture)?;
    let [cols, rows] = fixture.initial_size;

    let mut term = Terminal::new(cols, rows);
    term.feed(&bytes);
    let screen = term.screen();

    let expected_cursor = Cursor::at(fixture.expected.cursor.row, fixture.expected.cursor.col);
    if screen.cursor() != expected_cursor {
        return Err(format!(
            "{}: cursor mismatch: got ({},{}), expected ({},{})",
            fixture.name,
            screen.cursor().row,
            screen.cursor().col,
            expected_cursor.row,
            expected_cursor.col
        ));
    }

    if let Some(rows) = fixture.expected.rows
        && screen.rows() != rows
    {
        return Err(format!(
            "{}: row count mismatch: got {}, expected {rows}",
            fixture.name,
            screen.rows()
        ));
    }

    for exp in &fixture.expected.cells {
        let got = screen.cell(exp.row, exp.col).ok_or_else(|| {
            format!(
                "{}: cell out of bounds ({},{})",
                fixture.name, exp.row, exp.col
            )
        })?;
        let mut expected_chars = exp.ch.chars();
        let expected_ch = expected_chars
            .next()
            .ok_or_else(|| format!("{}: empty expected char string", fixture.name))?;
        if expected_chars.next().is_some() {
            return Err(format!(
                "{}: expected char string must be 1 char, got {:?}",
                fixture.name, exp.ch
            ));
        }
        if got.content() != expected_ch {
            return Err(format!(
                "{}: char mismatch at ({},{}): got {:?}, expected {:?}",
                fixture.name,
                exp.row,
                exp.col,
                got.content(),
                expected_ch
            ));
        }
    }

    if let Some(expected) = &fixture.expected.render {
        let got = screen.render();
        if &got != expected {
            return Err(format!(
                "{}: render mismatch:\n got {got:?}\nwant {expected:?}",
                fixture.name
            ));
        }
    }

    Ok(())
}

fn decode_hex(s: &str) -> Result<Vec<u8>, String> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if !compact.len().is_multiple_of(2) {
        return Err("hex string must have even length".to_string());
    }
    let mut out = Vec::with_capacity(compact.len() / 2);
    let bytes = compact.as_bytes();
    for pair in bytes.chunks_exact(2) {
        let hi = (pair[0] as char)
            .to_digit(16)
            .ok_or_else(|| "bad hex".to_string())?;
        let lo = (pair[1] as char)
            .to_digit(16)
            .ok_or_else(|| "bad hex".to_string())?;
        out.push(((hi << 4) | lo) as u8);
    }
    Ok(out)
}
