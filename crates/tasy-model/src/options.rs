//! Run parameters chosen by the operator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Follow-up protocol label written on every output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    #[default]
    Mensal,
    Trimestral,
    Semestral,
    Anual,
}

impl Protocol {
    pub const ALL: [Protocol; 4] = [
        Protocol::Mensal,
        Protocol::Trimestral,
        Protocol::Semestral,
        Protocol::Anual,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Mensal => "MENSAL",
            Self::Trimestral => "TRIMESTRAL",
            Self::Semestral => "SEMESTRAL",
            Self::Anual => "ANUAL",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Protocol {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|protocol| protocol.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ModelError::UnknownProtocol(value.to_string()))
    }
}

/// How the facility code of each record is obtained.
///
/// Two historical behaviours exist: one facility chosen for the whole run,
/// or a per-row lookup of the requesting sector in the facility catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacilityMode {
    /// Apply one configured facility to every record.
    Fixed { name: String, code: i64 },
    /// Resolve each record's sector column against the catalog.
    PerRow,
}

impl FacilityMode {
    /// Label used in output file names; anything outside `[A-Za-z0-9_-]`
    /// becomes `_` so the name never leaves the output directory.
    pub fn file_label(&self) -> String {
        match self {
            Self::Fixed { name, .. } => name
                .trim()
                .chars()
                .map(|ch| {
                    if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                        ch
                    } else {
                        '_'
                    }
                })
                .collect(),
            Self::PerRow => "POR_SETOR".to_string(),
        }
    }
}

/// Parameters of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    pub protocol: Protocol,
    pub facility: FacilityMode,
}

impl RunOptions {
    pub fn new(protocol: Protocol, facility: FacilityMode) -> Self {
        Self { protocol, facility }
    }
}
