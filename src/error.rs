use thiserror::Error;

/// Failures surfaced by typed-record construction, table validation, and
/// best-hit resolution.
///
/// None of these are recovered from: any failure aborts the run and carries
/// the offending value, since a bad record is a caller data-quality problem
/// rather than a transient fault.
#[derive(Debug, Error)]
pub enum BestHitError {
    /// A raw row did not have the 12 fields of BLAST tabular output.
    #[error("expected 12 tab-separated fields, found {found}")]
    ColumnCount { found: usize },

    /// A numeric column held a value that failed numeric coercion.
    #[error("column '{column}' holds non-numeric value {value:?}")]
    NonNumericField { column: &'static str, value: String },

    /// An e-value was zero, negative, or non-finite. The significance
    /// transform takes log10 of the e-value, which these would poison.
    #[error("query '{query_id}': e-value {e_value} is not a positive finite number")]
    NonPositiveEvalue { query_id: String, e_value: f64 },

    /// A query id had no integer suffix after the last '.', so the resolved
    /// table cannot be ordered.
    #[error("query id {query_id:?} has no parseable integer suffix after the last '.'")]
    QuerySuffix { query_id: String },
}
