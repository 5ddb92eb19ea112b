//! Row splitting for decoded report text
//!
//! Lines end at `\n` only; a `\r` before it is trimmed like any other
//! whitespace and a bare `\r` stays inside its field. Lines are split on
//! commas with every field trimmed. Quoted fields are not supported: a comma
//! inside quotes still splits the field. The parser knows nothing about
//! column meaning and does not skip the header line.

use csv::{ReaderBuilder, Terminator, Trim};

use crate::error::ParseError;

/// One line of a report, split into trimmed fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the decoded text
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Field at `index`, if the row is long enough
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Restartable row source over decoded text
#[derive(Debug, Clone, Copy)]
pub struct RowParser<'a> {
    text: &'a str,
}

impl<'a> RowParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Lazily iterate the non-blank lines. Each call starts from the top.
    pub fn rows(self) -> impl Iterator<Item = Result<RawRow, ParseError>> + 'a {
        ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(self.text.as_bytes())
            .into_records()
            .filter_map(|result| match result {
                Ok(record) => {
                    // A whitespace-only line trims down to a single empty field
                    if record.len() == 1 && record[0].is_empty() {
                        return None;
                    }
                    let line = record.position().map_or(0, |pos| pos.line() as usize);
                    Some(Ok(RawRow::new(
                        line,
                        record.iter().map(str::to_string).collect(),
                    )))
                }
                Err(err) => Some(Err(ParseError::from(err))),
            })
    }
}
