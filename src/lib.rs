//! ATS scanner library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod processing;
pub mod scanner;

pub use config::Config;
pub use error::{AtsScannerError, Result};
pub use scanner::{AtsScanner, ScanOptions};
