//! Sensor record decoding.
//!
//! One record is one text line of delimiter-separated fields:
//! `event, x, y, force` followed by a fixed number of diagnostic fields
//! (contact id and area on the reference device). Decoding never fails
//! towards the caller: malformed lines become [`TouchEvent::Invalid`] samples.

use super::events::TouchEvent;
use crate::config::ProtocolConfig;
use thiserror::Error;

/// Number of fields every record carries before the diagnostic tail.
pub const CORE_FIELDS: usize = 4;

/// Reasons a record line is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("unknown event code '{0}'")]
    UnknownEvent(String),

    #[error("field '{field}' is not a finite number: '{value}'")]
    BadNumber { field: &'static str, value: String },
}

/// One decoded sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSample {
    pub event: TouchEvent,
    /// Device-space x
    pub x: f64,
    /// Device-space y
    pub y: f64,
    pub force: f64,
    /// Raw fields of the source line, kept for diagnostics
    pub fields: Vec<String>,
}

impl InputSample {
    /// Creates a sample from already-decoded values.
    pub fn new(event: TouchEvent, x: f64, y: f64, force: f64) -> Self {
        Self {
            event,
            x,
            y,
            force,
            fields: Vec::new(),
        }
    }

    /// Placeholder for a line that failed to decode.
    pub fn invalid(line: &str) -> Self {
        Self {
            event: TouchEvent::Invalid,
            x: 0.0,
            y: 0.0,
            force: 0.0,
            fields: vec![line.to_string()],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.event.is_valid()
    }

    /// Diagnostic fields following event, x, y and force.
    pub fn diagnostics(&self) -> &[String] {
        self.fields.get(CORE_FIELDS..).unwrap_or(&[])
    }
}

/// Decoder for the fixed-arity record format.
#[derive(Debug, Clone)]
pub struct RecordParser {
    delimiter: char,
    field_count: usize,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(&ProtocolConfig::default())
    }
}

impl RecordParser {
    pub fn new(config: &ProtocolConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            field_count: CORE_FIELDS + config.diagnostic_fields,
        }
    }

    /// Total number of fields a record must have.
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Decodes one line, reporting why it was rejected.
    pub fn try_parse(&self, line: &str) -> Result<InputSample, ParseError> {
        let fields: Vec<&str> = line
            .trim_end_matches(['\r', '\n'])
            .split(self.delimiter)
            .map(str::trim)
            .collect();

        if fields.len() != self.field_count {
            return Err(ParseError::FieldCount {
                expected: self.field_count,
                found: fields.len(),
            });
        }

        let event = TouchEvent::from_code(fields[0]);
        if !event.is_valid() {
            return Err(ParseError::UnknownEvent(fields[0].to_string()));
        }

        Ok(InputSample {
            event,
            x: parse_number("x", fields[1])?,
            y: parse_number("y", fields[2])?,
            force: parse_number("force", fields[3])?,
            fields: fields.iter().map(|field| field.to_string()).collect(),
        })
    }

    /// Decodes one line; any failure yields an invalid sample.
    pub fn parse(&self, line: &str) -> InputSample {
        match self.try_parse(line) {
            Ok(sample) => sample,
            Err(err) => {
                log::debug!("Dropping record {:?}: {}", line, err);
                InputSample::invalid(line)
            }
        }
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, ParseError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ParseError::BadNumber {
            field,
            value: value.to_string(),
        })
}
