#![deny(unsafe_code)]

pub mod engine;
pub mod suggest;
pub mod types;
pub mod utils;

pub use engine::map_exam_columns;
pub use suggest::{SUGGESTION_THRESHOLD, suggest_aliases};
pub use types::{AliasSuggestion, ExamBinding, ExamColumnMap};
pub use utils::normalize_text;
