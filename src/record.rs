use std::fmt;

use crate::error::BestHitError;

/// Number of columns in BLAST tabular output (`-outfmt 6`).
pub const BLAST6_COLUMNS: usize = 12;

/// Canonical BLAST6 column names, in on-disk order.
pub const COLUMN_NAMES: [&str; BLAST6_COLUMNS] = [
    "qseqid", "sseqid", "pident", "length", "mismatch", "gapopen", "qstart", "qend", "sstart",
    "send", "evalue", "bitscore",
];

/// One candidate alignment between a query and a subject sequence, i.e. one
/// row of BLAST tabular output.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentRecord {
    pub query_id: String,
    pub subject_id: String,
    pub percent_identity: f64,
    pub alignment_length: u32,
    pub mismatch_count: u32,
    pub gap_open_count: u32,
    pub query_start: u32,
    pub query_end: u32,
    pub subject_start: u32,
    pub subject_end: u32,
    pub e_value: f64,
    pub bit_score: f64,
}

impl AlignmentRecord {
    /// Build a typed record from the 12 tab-separated fields of one row.
    ///
    /// The caller splits the line and strips any header row; this only does
    /// the typed half of validation: field count and numeric coercion.
    pub fn from_fields(fields: &[&str]) -> Result<Self, BestHitError> {
        if fields.len() != BLAST6_COLUMNS {
            return Err(BestHitError::ColumnCount {
                found: fields.len(),
            });
        }

        fn numeric<T: std::str::FromStr>(fields: &[&str], idx: usize) -> Result<T, BestHitError> {
            fields[idx].parse().map_err(|_| BestHitError::NonNumericField {
                column: COLUMN_NAMES[idx],
                value: fields[idx].to_string(),
            })
        }

        Ok(AlignmentRecord {
            query_id: fields[0].to_string(),
            subject_id: fields[1].to_string(),
            percent_identity: numeric(fields, 2)?,
            alignment_length: numeric(fields, 3)?,
            mismatch_count: numeric(fields, 4)?,
            gap_open_count: numeric(fields, 5)?,
            query_start: numeric(fields, 6)?,
            query_end: numeric(fields, 7)?,
            subject_start: numeric(fields, 8)?,
            subject_end: numeric(fields, 9)?,
            e_value: numeric(fields, 10)?,
            bit_score: numeric(fields, 11)?,
        })
    }

    /// -log10 of the e-value. Larger means more significant, which puts the
    /// e-value on the same "larger is better" axis as the other quality
    /// criteria. Requires `e_value > 0`.
    pub fn neg_log10_evalue(&self) -> f64 {
        -self.e_value.log10()
    }

    /// Integer suffix of the query id: the part after the last `.`.
    /// This suffix defines the ordering of resolved output.
    pub fn query_ordinal(&self) -> Result<u64, BestHitError> {
        query_ordinal(&self.query_id)
    }
}

/// Parse the integer suffix of a query id such as `read.17` -> 17.
///
/// Compound ids take the component after the LAST separator, so `a.b.7`
/// yields 7. An id without a parseable suffix is a format error.
pub fn query_ordinal(query_id: &str) -> Result<u64, BestHitError> {
    query_id
        .rsplit_once('.')
        .and_then(|(_, suffix)| suffix.parse().ok())
        .ok_or_else(|| BestHitError::QuerySuffix {
            query_id: query_id.to_string(),
        })
}

impl fmt::Display for AlignmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{:.3}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:e}\t{}",
            self.query_id,
            self.subject_id,
            self.percent_identity,
            self.alignment_length,
            self.mismatch_count,
            self.gap_open_count,
            self.query_start,
            self.query_end,
            self.subject_start,
            self.subject_end,
            self.e_value,
            self.bit_score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_roundtrip() {
        let fields = [
            "read.1",
            "NC_000008.11",
            "100.000",
            "52",
            "0",
            "0",
            "1",
            "52",
            "38174213",
            "38174264",
            "7.01e-41",
            "171",
        ];
        let rec = AlignmentRecord::from_fields(&fields).unwrap();
        assert_eq!(rec.query_id, "read.1");
        assert_eq!(rec.alignment_length, 52);
        assert_eq!(rec.bit_score, 171.0);
        assert_eq!(rec.e_value, 7.01e-41);
    }

    #[test]
    fn test_from_fields_wrong_column_count() {
        let fields = ["read.1", "chr1", "99.0", "50", "1"];
        match AlignmentRecord::from_fields(&fields) {
            Err(BestHitError::ColumnCount { found: 5 }) => {}
            other => panic!("expected ColumnCount error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_fields_non_numeric() {
        let fields = [
            "read.1", "chr1", "pident", "52", "0", "0", "1", "52", "10", "61", "1e-20", "100",
        ];
        match AlignmentRecord::from_fields(&fields) {
            Err(BestHitError::NonNumericField { column, value }) => {
                assert_eq!(column, "pident");
                assert_eq!(value, "pident");
            }
            other => panic!("expected NonNumericField error, got {other:?}"),
        }
    }

    #[test]
    fn test_query_ordinal() {
        assert_eq!(query_ordinal("read.1").unwrap(), 1);
        assert_eq!(query_ordinal("read.42").unwrap(), 42);
        // last component wins for compound ids
        assert_eq!(query_ordinal("sample.read.7").unwrap(), 7);
        assert!(query_ordinal("read").is_err());
        assert!(query_ordinal("read.x").is_err());
        assert!(query_ordinal("read.").is_err());
    }

    #[test]
    fn test_neg_log10_evalue() {
        let fields = [
            "read.1", "chr1", "100.0", "52", "0", "0", "1", "52", "10", "61", "1e-20", "100",
        ];
        let rec = AlignmentRecord::from_fields(&fields).unwrap();
        assert!((rec.neg_log10_evalue() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_tsv() {
        let fields = [
            "read.1",
            "NC_000008.11",
            "100.000",
            "52",
            "0",
            "0",
            "1",
            "52",
            "38174213",
            "38174264",
            "7.01e-41",
            "171",
        ];
        let rec = AlignmentRecord::from_fields(&fields).unwrap();
        assert_eq!(
            rec.to_string(),
            "read.1\tNC_000008.11\t100.000\t52\t0\t0\t1\t52\t38174213\t38174264\t7.01e-41\t171"
        );
    }
}
