#![deny(unsafe_code)]

//! Configuration loading: the exam catalog (canonical codes and lab column
//! aliases) and the facility catalog.

pub mod config;
pub mod document;
pub mod error;
pub mod loaders;

pub use crate::config::TasyConfig;
pub use crate::document::{ConfigDocument, ExamEntry};
pub use crate::error::ConfigError;
pub use crate::loaders::{DEFAULT_CONFIG_FILE, load_config, parse_config, resolve_config_path};
