//! Filesystem collaborators of the correlation pipeline: parameter files in,
//! calculation directories out.

pub mod config;
pub mod layout;
pub mod manifest;
pub mod tables;

pub use config::load_parameters;
pub use layout::{CalculationDirectory, DATA_DIR};
pub use manifest::RunManifest;
pub use tables::{write_correlation_table, write_spectrum_table};

use std::path::Path;

use hhcf_core::errors::{ErrorInfo, HhcfError};

pub(crate) fn io_error(code: &str, path: &Path, err: impl ToString) -> HhcfError {
    HhcfError::Io(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}
