//! Reconciliation engine: patient matching, per-source preprocessing,
//! two-source merge and projection into import rows.

pub mod assemble;
pub mod columns;
pub mod error;
pub mod merge;
pub mod patient_index;
pub mod pipeline;
pub mod preprocess;
pub mod unmatched;

pub use assemble::assemble_output;
pub use columns::{LabColumns, RegistryColumns, TableRole, detect_lab_columns, detect_registry_columns};
pub use error::{CoreError, Result};
pub use merge::merge_sources;
pub use patient_index::PatientIndex;
pub use pipeline::{RunInputs, RunOutcome, RunStats, run_reconciliation};
pub use preprocess::{PreparedSource, preprocess_source};
pub use unmatched::UnmatchedReport;
