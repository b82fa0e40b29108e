//! Report of lab rows whose patient was not found in the registry.

use std::collections::BTreeSet;

use tasy_model::ReconciledRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnmatchedReport {
    /// Distinct display names, sorted. Blank names are left out.
    pub names: BTreeSet<String>,
    /// Unmatched rows across all sources, blank names included.
    pub row_count: usize,
}

impl UnmatchedReport {
    /// Collects unmatched records from every source.
    pub fn collect<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ReconciledRecord>,
    {
        let mut report = Self::default();
        for record in records.into_iter().filter(|record| !record.is_matched()) {
            report.row_count += 1;
            if let Some(name) = record.display_name.as_deref()
                && !name.trim().is_empty()
            {
                report.names.insert(name.to_string());
            }
        }
        report
    }

    /// True when there is no name to report, even if some unmatched rows
    /// had a blank name.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
