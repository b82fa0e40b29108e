//! Data model for reconciling lab result spreadsheets into TASY import rows.

pub mod error;
pub mod exam;
pub mod facility;
pub mod lookup;
pub mod options;
pub mod record;

pub use error::{ModelError, Result};
pub use exam::{EXAM_CODE_PREFIX, ExamCategory, ExamCode, ExamDefinition};
pub use facility::{Facility, FacilityCatalog};
pub use lookup::{
    CaseInsensitiveSet, NAME_CANDIDATES, SECTOR_CANDIDATES, TIMESTAMP_CANDIDATES,
    VISIT_CANDIDATES,
};
pub use options::{FacilityMode, Protocol, RunOptions};
pub use record::{
    COL_FACILITY_CODE, COL_PATIENT_NAME, COL_PROTOCOL, COL_RESULT_TIMESTAMP, COL_VISIT_ID,
    FIXED_OUTPUT_COLUMNS, JoinKey, OutputRow, OutputSchema, ReconciledRecord,
};
