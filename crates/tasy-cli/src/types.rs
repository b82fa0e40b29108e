use tasy_core::RunOutcome;
use tasy_model::RunOptions;
use tasy_output::WrittenOutputs;

#[derive(Debug)]
pub struct ImportResult {
    pub outcome: RunOutcome,
    pub options: RunOptions,
    /// `None` on a dry run.
    pub written: Option<WrittenOutputs>,
    pub config_version: Option<String>,
    pub config_updated: Option<String>,
}

/// One line of the exam reference listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamReferenceRow {
    /// TASY code without the `NR_EXAME_` namespace.
    pub tasy_code: String,
    pub name: String,
    /// Lab column aliases, comma separated.
    pub lab_columns: String,
}
