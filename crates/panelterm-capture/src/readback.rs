//! Read values out of a reconstructed screen by position.
//!
//! Instrument panels draw each reading at a fixed screen location. A
//! [`FieldSpec`] names one such location using the same 1-based
//! coordinates the console's own `ESC [ row ; col H` uses, so a field can
//! be copied straight from a capture.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use panelterm_core::Screen;

use crate::error::CaptureError;

/// One named, fixed-width field on the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    /// 1-based row.
    pub row: usize,
    /// 1-based column.
    pub col: usize,
    pub width: usize,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, row: usize, col: usize, width: usize) -> Self {
        Self {
            name: name.into(),
            row,
            col,
            width,
        }
    }

    /// Parse `NAME=ROW:COL:WIDTH`.
    pub fn parse(spec: &str) -> Result<Self, CaptureError> {
        let (name, coords) = spec
            .split_once('=')
            .ok_or_else(|| CaptureError::field_spec(spec, "missing '='"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CaptureError::field_spec(spec, "empty name"));
        }

        let mut parts = coords.split(':');
        let mut next = || -> Result<usize, CaptureError> {
            let part = parts
                .next()
                .ok_or_else(|| CaptureError::field_spec(spec, "expected ROW:COL:WIDTH"))?;
            match part.trim().parse::<usize>() {
                Ok(0) => Err(CaptureError::field_spec(spec, "values are 1-based")),
                Ok(v) => Ok(v),
                Err(_) => Err(CaptureError::field_spec(spec, "expected positive integer")),
            }
        };
        let row = next()?;
        let col = next()?;
        let width = next()?;
        if parts.next().is_some() {
            return Err(CaptureError::field_spec(spec, "expected ROW:COL:WIDTH"));
        }

        Ok(Self::new(name, row, col, width))
    }

    /// Trimmed text under this field, or `None` if nothing is drawn there.
    pub fn read(&self, screen: &Screen) -> Option<String> {
        screen.text_at(
            self.row.saturating_sub(1),
            self.col.saturating_sub(1),
            self.width,
        )
    }
}

/// Ordered set of fields read from one panel layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadbackProfile {
    fields: Vec<FieldSpec>,
}

impl ReadbackProfile {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Superconducting magnet status panel: helium level (%) and shield
    /// temperature (K).
    pub fn magnet() -> Self {
        Self::new(vec![
            FieldSpec::new("helium_level", 6, 41, 4),
            FieldSpec::new("shield_temperature", 11, 43, 3),
        ])
    }

    /// Add a field; a field with the same name is replaced in place.
    pub fn push(&mut self, field: FieldSpec) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Read every field from `screen`.
    pub fn extract(&self, screen: &Screen) -> Readback {
        let values = self
            .fields
            .iter()
            .map(|field| {
                let value = field.read(screen);
                if value.is_none() {
                    tracing::debug!(field = %field.name, row = field.row, col = field.col, "field is blank");
                }
                (field.name.clone(), value)
            })
            .collect();
        Readback { values }
    }
}

/// Values read from one screen, in profile order.
///
/// Serializes as a JSON object with `null` for missing fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readback {
    values: Vec<(String, Option<String>)>,
}

impl Readback {
    /// Raw text of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Numeric value of `name`, if present and numeric.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name)?.trim().parse().ok()
    }

    /// `false` while the console has not drawn every field yet.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|(_, v)| v.is_some())
    }

    /// Names of fields with no value.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    /// Compact JSON object.
    pub fn to_json(&self) -> Result<String, CaptureError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for Readback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
