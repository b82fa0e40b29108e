//! CLI library components for the TASY import builder.

pub mod logging;
pub mod pipeline;
pub mod reference;
pub mod types;
