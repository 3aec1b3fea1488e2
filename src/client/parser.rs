//! Record parsing.
//!
//! Turns decoded bursts into the output sequence. Data lines are
//! tab-delimited; the first column is the server's 1-based token number,
//! which restarts for each sentence. A reset to 1 therefore marks a
//! sentence boundary, reconstructed here as a [`Record::Boundary`] entry.

use crate::error::{FrogError, Result};
use crate::record::{Annotations, Record, RecordShape, Token};

/// Sentinel line closing a response frame.
const READY: &str = "READY";

/// Accumulates records across bursts until the sentinel arrives.
pub struct RecordParser {
    shape: RecordShape,
    records: Vec<Record>,
}

impl RecordParser {
    pub fn new(shape: RecordShape) -> Self {
        Self {
            shape,
            records: Vec::new(),
        }
    }

    /// Parses one burst. Returns `true` once the `READY` sentinel is seen;
    /// lines after the sentinel in the same burst are not processed.
    pub fn feed(&mut self, burst: &str) -> Result<bool> {
        for line in burst.split('\n') {
            let line = line.trim_end_matches(['\r', '\t']);
            if line.is_empty() {
                continue;
            }
            if line == READY {
                return Ok(true);
            }
            self.parse_line(line)?;
        }
        Ok(false)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    fn parse_line(&mut self, line: &str) -> Result<()> {
        let fields: Vec<&str> = line.split('\t').collect();
        let token_number: u32 = match fields[0].parse() {
            Ok(n) => n,
            // Not a data line; the server interleaves blank continuations
            // and informational lines we do not care about.
            Err(_) => return Ok(()),
        };
        if fields.len() < 5 {
            return Err(malformed(
                line,
                format!("expected at least 5 fields, got {}", fields.len()),
            ));
        }

        // Numbering restarted: the previous sentence is complete.
        if token_number == 1 && !self.records.is_empty() {
            self.records.push(Record::Boundary);
        }

        let annotations = parse_annotations(&fields, line)?;
        self.records.push(Record::Token(Token {
            token_number,
            word: fields[1].to_string(),
            lemma: fields[2].to_string(),
            morph: fields[3].to_string(),
            pos: fields[4].to_string(),
            annotations: match self.shape {
                RecordShape::Extended => Some(annotations),
                RecordShape::Short => None,
            },
        }));
        Ok(())
    }
}

/// Extended columns are validated whenever present, even for sessions that
/// only keep the short shape; a truncated row is fine, a non-numeric
/// confidence or head column is not.
fn parse_annotations(fields: &[&str], line: &str) -> Result<Annotations> {
    let mut annotations = Annotations::default();
    if let Some(raw) = fields.get(5) {
        annotations.confidence = Some(
            raw.parse()
                .map_err(|_| malformed(line, format!("confidence {raw:?} is not a float")))?,
        );
    }
    if let Some(raw) = fields.get(6) {
        annotations.named_entity = Some(raw.to_string());
    }
    if let Some(raw) = fields.get(7) {
        annotations.chunk = Some(raw.to_string());
    }
    if let Some(raw) = fields.get(8) {
        annotations.head = Some(
            raw.parse()
                .map_err(|_| malformed(line, format!("head token {raw:?} is not an integer")))?,
        );
    }
    if let Some(raw) = fields.get(9) {
        annotations.dependency = Some(raw.to_string());
    }
    Ok(annotations)
}

fn malformed(line: &str, reason: String) -> FrogError {
    FrogError::MalformedRecord {
        line: line.to_string(),
        reason,
    }
}
