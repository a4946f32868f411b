use std::fs;
use std::path::Path;

use hhcf_core::errors::{ErrorInfo, HhcfError};
use hhcf_spec::PhysicalParameters;
use tracing::debug;

use crate::io_error;

/// Reads and validates a parameter file, choosing the decoder from the
/// extension (`.json`, `.yaml` or `.yml`).
pub fn load_parameters(path: &Path) -> Result<PhysicalParameters, HhcfError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let bytes = fs::read(path).map_err(|err| io_error("config-read", path, err))?;
    let params = match extension.as_deref() {
        Some("json") => PhysicalParameters::from_json_slice(&bytes),
        Some("yaml") | Some("yml") => PhysicalParameters::from_yaml_slice(&bytes),
        _ => Err(HhcfError::Configuration(
            ErrorInfo::new("unsupported-config-format", "unrecognised parameter file extension")
                .with_context("path", path.display().to_string())
                .with_hint("use a .json, .yaml or .yml file"),
        )),
    }?;
    debug!(path = %path.display(), calculation = %params.calculation_name(), "loaded parameters");
    Ok(params)
}
