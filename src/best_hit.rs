use indexmap::IndexMap;
use log::debug;
use ordered_float::OrderedFloat;

use crate::error::BestHitError;
use crate::record::AlignmentRecord;
use crate::table::{AlignmentTable, ResolvedAlignmentTable};

/// Criterion evaluated on a candidate record. OrderedFloat gives a total
/// order so exact f64 ties survive the comparison intact.
type Criterion = fn(&AlignmentRecord) -> OrderedFloat<f64>;

/// Quality criteria, maximized in this order. Bit score is the primary
/// signal; e-value, identity and length only break bit-score ties.
/// Reordering these changes selection outcomes on tied inputs.
const MAX_CRITERIA: [(&str, Criterion); 4] = [
    ("bitscore", |r| OrderedFloat(r.bit_score)),
    ("-log10(evalue)", |r| OrderedFloat(r.neg_log10_evalue())),
    ("pident", |r| OrderedFloat(r.percent_identity)),
    ("length", |r| OrderedFloat(r.alignment_length as f64)),
];

/// Penalty criteria, minimized in this order once every quality signal ties.
const MIN_CRITERIA: [(&str, Criterion); 2] = [
    ("mismatch", |r| OrderedFloat(r.mismatch_count as f64)),
    ("gapopen", |r| OrderedFloat(r.gap_open_count as f64)),
];

/// Resolve a table of candidate alignments to exactly one best hit per query.
///
/// Within each query group the cascading filter keeps, criterion by
/// criterion, only the candidates achieving the best value of the current
/// criterion among the survivors of the previous ones. Groups still tied
/// after all six criteria are true duplicates and collapse to the earliest
/// input row. The result holds one record per distinct query id, sorted
/// ascending by the integer suffix of the query id.
///
/// Pure function: the input table is consumed, nothing else is touched.
/// Fails fast on non-positive e-values or query ids without an integer
/// suffix; never returns partial results.
pub fn resolve(table: AlignmentTable) -> Result<ResolvedAlignmentTable, BestHitError> {
    table.validate()?;
    let records = table.into_records();

    // Group candidate row indices by query id, first-encounter order.
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (idx, record) in records.iter().enumerate() {
        groups
            .entry(record.query_id.clone())
            .or_default()
            .push(idx);
    }
    debug!(
        "resolving {} candidate rows across {} queries",
        records.len(),
        groups.len()
    );

    let mut winners: Vec<usize> = Vec::with_capacity(groups.len());
    for (query_id, mut candidates) in groups {
        for (name, criterion) in MAX_CRITERIA {
            retain_extreme(&mut candidates, &records, criterion, true);
            if candidates.len() == 1 {
                debug!("query {query_id}: settled by {name}");
                break;
            }
        }
        if candidates.len() > 1 {
            for (name, criterion) in MIN_CRITERIA {
                retain_extreme(&mut candidates, &records, criterion, false);
                if candidates.len() == 1 {
                    debug!("query {query_id}: settled by {name}");
                    break;
                }
            }
        }
        winners.push(pick_canonical(&candidates, &records, &query_id));
    }

    // Order surviving rows by the numeric suffix of the query id.
    let mut ordered: Vec<(u64, usize)> = Vec::with_capacity(winners.len());
    for idx in winners {
        ordered.push((records[idx].query_ordinal()?, idx));
    }
    ordered.sort_by_key(|&(ordinal, _)| ordinal);

    let resolved = ordered
        .into_iter()
        .map(|(_, idx)| records[idx].clone())
        .collect();
    Ok(ResolvedAlignmentTable::from_sorted(resolved))
}

/// Intersect the candidate set with the rows achieving the extreme value of
/// `criterion`: the maximum when `maximize` is set, the minimum otherwise.
/// Each call can only shrink or preserve the set.
fn retain_extreme(
    candidates: &mut Vec<usize>,
    records: &[AlignmentRecord],
    criterion: Criterion,
    maximize: bool,
) {
    if candidates.len() <= 1 {
        return;
    }
    let mut extreme = criterion(&records[candidates[0]]);
    for &idx in &candidates[1..] {
        let value = criterion(&records[idx]);
        extreme = if maximize {
            extreme.max(value)
        } else {
            extreme.min(value)
        };
    }
    candidates.retain(|&idx| criterion(&records[idx]) == extreme);
}

/// Final single-survivor pick for a group: the earliest input row among the
/// candidates with maximal bit score. After the cascade all survivors tie on
/// every criterion, so this collapses true duplicates deterministically.
fn pick_canonical(candidates: &[usize], records: &[AlignmentRecord], query_id: &str) -> usize {
    let mut winner = candidates[0];
    for &idx in &candidates[1..] {
        if records[idx].bit_score > records[winner].bit_score {
            winner = idx;
        }
    }
    if candidates.len() > 1 {
        debug!(
            "query {query_id}: {} fully tied candidates, keeping row {winner}",
            candidates.len()
        );
    }
    winner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(query_id: &str, bit_score: f64, e_value: f64) -> AlignmentRecord {
        AlignmentRecord {
            query_id: query_id.to_string(),
            subject_id: "chr1".to_string(),
            percent_identity: 100.0,
            alignment_length: 52,
            mismatch_count: 0,
            gap_open_count: 0,
            query_start: 1,
            query_end: 52,
            subject_start: 100,
            subject_end: 151,
            e_value,
            bit_score,
        }
    }

    #[test]
    fn test_retain_extreme_max() {
        let records = vec![
            record("read.1", 100.0, 1e-20),
            record("read.1", 171.0, 1e-40),
            record("read.1", 171.0, 1e-40),
        ];
        let mut candidates = vec![0, 1, 2];
        retain_extreme(&mut candidates, &records, |r| OrderedFloat(r.bit_score), true);
        assert_eq!(candidates, vec![1, 2]);
    }

    #[test]
    fn test_retain_extreme_min() {
        let mut records = vec![
            record("read.1", 171.0, 1e-40),
            record("read.1", 171.0, 1e-40),
        ];
        records[0].mismatch_count = 2;
        let mut candidates = vec![0, 1];
        retain_extreme(
            &mut candidates,
            &records,
            |r| OrderedFloat(r.mismatch_count as f64),
            false,
        );
        assert_eq!(candidates, vec![1]);
    }

    #[test]
    fn test_pick_canonical_prefers_first_row() {
        let records = vec![
            record("read.1", 171.0, 1e-40),
            record("read.1", 171.0, 1e-40),
        ];
        assert_eq!(pick_canonical(&[0, 1], &records, "read.1"), 0);
    }

    #[test]
    fn test_empty_table() {
        let resolved = resolve(AlignmentTable::default()).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_single_row_passes_through() {
        let table = AlignmentTable::new(vec![record("read.1", 171.0, 1e-40)]);
        let resolved = resolve(table).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.records()[0], record("read.1", 171.0, 1e-40));
    }
}
