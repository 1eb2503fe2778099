//! Splitting a payload into the field set of its slip format

use std::collections::HashMap;

use crate::error::ParseError;
use crate::models::{RawPayload, SlipFormat};
use crate::slip::layout::{Field, Layout};
use crate::slip::text::{Charset, clean};

/// Field texts of one slip, keyed by layout field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlipFields {
    layout: &'static Layout,
    values: HashMap<Field, String>,
}

impl SlipFields {
    /// Empty field set of `layout`
    pub fn new(layout: &'static Layout) -> Self {
        Self {
            layout,
            values: HashMap::new(),
        }
    }

    /// Slip format
    pub fn format(&self) -> SlipFormat {
        self.layout.format
    }

    /// Field text, empty when absent
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Store the text of line `index`
    fn set_line(&mut self, index: usize, text: &str) {
        let Some(field) = self.layout.field_at(index) else {
            tracing::trace!(index, "ignoring line past the layout");
            return;
        };
        let value = self.values.entry(field).or_default();
        // optional data keeps its own line breaks
        if field == Field::OptionalData && index >= self.layout.fields.len() {
            value.push('\n');
        }
        value.push_str(clean(text));
    }
}

/// Split a complete payload positionally
pub fn parse(payload: &RawPayload) -> Result<SlipFields, ParseError> {
    if payload.bytes().is_empty() {
        return Err(ParseError::Empty);
    }
    let charset = Charset::detect(payload);
    let lines: Vec<String> = payload
        .lines()
        .into_iter()
        .map(|line| charset.decode(line.bytes))
        .collect();

    let header = lines.first().map(|l| clean(l)).unwrap_or_default();
    let layout =
        Layout::for_header(header).ok_or_else(|| ParseError::UnknownFormat(header.to_string()))?;
    if lines.len() < layout.required {
        return Err(ParseError::MissingFields {
            format: layout.format,
            expected: layout.required,
            found: lines.len(),
        });
    }

    let mut fields = SlipFields::new(layout);
    for (index, line) in lines.iter().enumerate() {
        fields.set_line(index, line);
    }
    tracing::trace!(format = ?layout.format, lines = lines.len(), "payload split");
    Ok(fields)
}
