//! Resumable chunked parsing of a dataset body.
//!
//! A multi-hundred-thousand-row body must never be parsed in one synchronous
//! pass. `ChunkedParser::step` processes one bounded window of rows and
//! reports whether input remains; the driver yields to the scheduler between
//! steps. The parser also accumulates the availability-index inputs (distinct
//! days, min/max instant) so the dataset needs no second pass.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::record::{self, IntensityRecord};
use crate::schema::DatasetSchema;

pub const DEFAULT_CHUNK_ROWS: usize = 5000;

/// Result of one `step` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A full chunk was consumed and rows remain; yield, then step again.
    Yielded { parsed_rows: usize },
    /// All input consumed; call `finish`.
    Done,
}

/// Everything one parse pass produced.
#[derive(Debug)]
pub struct ParseSummary {
    pub records: Vec<IntensityRecord>,
    pub skipped_rows: u64,
    pub days: BTreeSet<NaiveDate>,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

pub struct ChunkedParser {
    schema: DatasetSchema,
    lines: Vec<String>,
    cursor: usize,
    chunk_rows: usize,
    records: Vec<IntensityRecord>,
    skipped_rows: u64,
    days: BTreeSet<NaiveDate>,
    earliest: Option<DateTime<Utc>>,
    latest: Option<DateTime<Utc>>,
}

impl ChunkedParser {
    /// `lines` are data lines only; the caller strips the header first.
    pub fn new(schema: DatasetSchema, lines: Vec<String>, chunk_rows: usize) -> Self {
        Self {
            schema,
            lines,
            cursor: 0,
            chunk_rows: chunk_rows.max(1),
            records: Vec::new(),
            skipped_rows: 0,
            days: BTreeSet::new(),
            earliest: None,
            latest: None,
        }
    }

    /// Parses at most one chunk of rows. Rows failing normalization are
    /// counted and skipped, never fatal. Blank lines are ignored outright.
    pub fn step(&mut self) -> StepOutcome {
        let end = (self.cursor + self.chunk_rows).min(self.lines.len());
        let mut parsed_rows = 0;
        while self.cursor < end {
            let line = self.lines[self.cursor].trim();
            self.cursor += 1;
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            match record::normalize(&self.schema, &fields) {
                Some(rec) => {
                    self.days.insert(rec.instant.date_naive());
                    self.earliest = Some(match self.earliest {
                        Some(cur) => cur.min(rec.instant),
                        None => rec.instant,
                    });
                    self.latest = Some(match self.latest {
                        Some(cur) => cur.max(rec.instant),
                        None => rec.instant,
                    });
                    self.records.push(rec);
                    parsed_rows += 1;
                }
                None => self.skipped_rows += 1,
            }
        }
        if self.cursor >= self.lines.len() {
            StepOutcome::Done
        } else {
            StepOutcome::Yielded { parsed_rows }
        }
    }

    pub fn rows_remaining(&self) -> usize {
        self.lines.len() - self.cursor
    }

    pub fn finish(self) -> ParseSummary {
        ParseSummary {
            records: self.records,
            skipped_rows: self.skipped_rows,
            days: self.days,
            earliest: self.earliest,
            latest: self.latest,
        }
    }
}
