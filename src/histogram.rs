use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;

use crate::table::ResolvedAlignmentTable;

/// One bin of the alignment-length histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBin {
    pub alignment_length: u32,
    pub abundance: u64,
}

/// Frequency distribution of alignment lengths over a resolved table: one
/// bin per distinct length, ascending, no zero-abundance bins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    bins: Vec<LengthBin>,
}

impl FrequencyTable {
    pub fn bins(&self) -> &[LengthBin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Total abundance across all bins, equal to the number of resolved rows
    /// the table was aggregated from.
    pub fn total_abundance(&self) -> u64 {
        self.bins.iter().map(|bin| bin.abundance).sum()
    }

    /// Write the table as CSV with an `alignment_length,abundance` header.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "alignment_length,abundance")?;
        for bin in &self.bins {
            writeln!(writer, "{},{}", bin.alignment_length, bin.abundance)?;
        }
        Ok(())
    }
}

/// Count how often each distinct alignment length occurs in a resolved
/// table. Pure function; the BTreeMap gives the ascending-length order of
/// the output bins directly.
pub fn aggregate(resolved: &ResolvedAlignmentTable) -> FrequencyTable {
    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
    for record in resolved.records() {
        *counts.entry(record.alignment_length).or_insert(0) += 1;
    }

    FrequencyTable {
        bins: counts
            .into_iter()
            .map(|(alignment_length, abundance)| LengthBin {
                alignment_length,
                abundance,
            })
            .collect(),
    }
}
