//! CSV parsing with spreadsheet-style type inference.

use std::collections::HashMap;
use std::fmt;

use csv::{ReaderBuilder, Trim};

use crate::format::format_number;

/// A single inferred cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Infers the type of a raw (already trimmed) cell.
    ///
    /// Empty cells are `Null`, `true`/`TRUE`/`false`/`FALSE` are booleans,
    /// plain decimal notation is numeric and everything else stays text.
    pub fn infer(raw: &str) -> Self {
        match raw {
            "" => CellValue::Null,
            "true" | "TRUE" => CellValue::Bool(true),
            "false" | "FALSE" => CellValue::Bool(false),
            _ => match parse_decimal(raw) {
                Some(n) => CellValue::Number(n),
                None => CellValue::Text(raw.to_string()),
            },
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Canonical text form, or `None` for an empty cell.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

// Accepts `-12`, `3.5`, `.5`, `7.` and an optional exponent. Rejects forms
// like `+5`, `inf` or `NaN` that `f64::from_str` would otherwise take.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    let body = raw.strip_prefix('-').unwrap_or(raw);
    let mantissa = body.split(['e', 'E']).next().unwrap_or("");
    let starts_ok = mantissa
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.');
    if !starts_ok || !mantissa.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// One data row keyed by header name. Columns missing from a short row read
/// as `Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow(HashMap<String, CellValue>);

impl RawRow {
    pub fn get(&self, column: &str) -> &CellValue {
        self.0.get(column).unwrap_or(&CellValue::Null)
    }

    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).as_text()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        RawRow(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Parses CSV text with a header row into typed rows, preserving input order.
///
/// # Errors
///
/// Returns an error if the text is not valid UTF-8 or the header row cannot
/// be read.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<RawRow>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), CellValue::infer(v)))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
