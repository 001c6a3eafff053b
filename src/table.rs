use std::io::Write;

use anyhow::Result;

use crate::error::BestHitError;
use crate::record::{AlignmentRecord, COLUMN_NAMES};

/// An ordered collection of candidate alignments. Multiple records may share
/// a query id; order is the order records were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentTable {
    records: Vec<AlignmentRecord>,
}

impl AlignmentTable {
    pub fn new(records: Vec<AlignmentRecord>) -> Self {
        AlignmentTable { records }
    }

    pub fn push(&mut self, record: AlignmentRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[AlignmentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AlignmentRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fail-fast check of the invariants best-hit resolution relies on:
    /// every e-value is a positive finite number (its log10 is taken for the
    /// significance transform) and every query id carries an integer suffix
    /// (the output ordering key).
    pub fn validate(&self) -> Result<(), BestHitError> {
        for record in &self.records {
            if !(record.e_value > 0.0 && record.e_value.is_finite()) {
                return Err(BestHitError::NonPositiveEvalue {
                    query_id: record.query_id.clone(),
                    e_value: record.e_value,
                });
            }
            record.query_ordinal()?;
        }
        Ok(())
    }
}

impl FromIterator<AlignmentRecord> for AlignmentTable {
    fn from_iter<I: IntoIterator<Item = AlignmentRecord>>(iter: I) -> Self {
        AlignmentTable {
            records: iter.into_iter().collect(),
        }
    }
}

/// Output of best-hit resolution: exactly one record per distinct query id,
/// ordered by ascending integer suffix of the query id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedAlignmentTable {
    records: Vec<AlignmentRecord>,
}

impl ResolvedAlignmentTable {
    /// Internal constructor: the resolver guarantees one-row-per-query and
    /// suffix ordering before wrapping.
    pub(crate) fn from_sorted(records: Vec<AlignmentRecord>) -> Self {
        ResolvedAlignmentTable { records }
    }

    pub fn records(&self) -> &[AlignmentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AlignmentRecord> {
        self.records
    }

    /// View the resolved rows as a plain alignment table, e.g. to re-run
    /// resolution over them.
    pub fn into_table(self) -> AlignmentTable {
        AlignmentTable::new(self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the table as TSV in canonical column order, optionally with a
    /// header row, for downstream export collaborators.
    pub fn write_tsv<W: Write>(&self, writer: &mut W, header: bool) -> Result<()> {
        if header {
            writeln!(writer, "{}", COLUMN_NAMES.join("\t"))?;
        }
        for record in &self.records {
            writeln!(writer, "{record}")?;
        }
        Ok(())
    }
}
