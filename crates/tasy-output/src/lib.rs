//! Output generation: the TASY import table and the inconsistency report.

pub mod error;
pub mod frame;
pub mod writer;

pub use error::OutputError;
pub use frame::{UNMATCHED_COLUMN, build_output_frame, build_unmatched_frame};
pub use writer::{
    OutputOptions, UNMATCHED_FILE_NAME, WrittenOutputs, output_file_name, write_outputs,
};
