use thiserror::Error;

use crate::columns::TableRole;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{table} table has no columns")]
    EmptyTable { table: TableRole },
    #[error(
        "{table} table has no {field} column (expected one of: {expected}); available columns: {available}"
    )]
    MissingColumn {
        table: TableRole,
        field: &'static str,
        expected: String,
        available: String,
    },
    #[error("visit identifier {value:?} is not an integer")]
    InvalidVisitId { value: String },
    #[error("record with visit identifier {visit_id} has no facility code")]
    MissingFacility { visit_id: i64 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
