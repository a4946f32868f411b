use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use hhcf_core::errors::{ErrorInfo, HhcfError};
use hhcf_core::provenance::{RunProvenance, SchemaVersion};
use hhcf_spec::{stable_hash_string, to_canonical_json_bytes, PhysicalParameters};
use serde::{Deserialize, Serialize};

use crate::io_error;

/// Index of everything a calculation directory holds, written last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Schema of this manifest.
    pub schema: SchemaVersion,
    /// Name of the calculation directory.
    pub calculation: String,
    /// Input hash, model identifiers and tool versions.
    pub provenance: RunProvenance,
    /// Written files keyed by role, relative to the calculation directory.
    pub files: BTreeMap<String, PathBuf>,
}

impl RunManifest {
    /// Starts a manifest for `params` with an empty file index.
    pub fn for_parameters(params: &PhysicalParameters) -> Result<Self, HhcfError> {
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert("hhcf-spec".to_string(), hhcf_spec::VERSION.to_string());
        tool_versions.insert("hhcf-io".to_string(), env!("CARGO_PKG_VERSION").to_string());
        Ok(Self {
            schema: SchemaVersion::default(),
            calculation: params.calculation_name(),
            provenance: RunProvenance {
                input_hash: stable_hash_string(params)?,
                spectrum_function: params.spectrum_function.identifier().to_string(),
                inverse_fourier_transform_method: params
                    .inverse_fourier_transform_method
                    .identifier()
                    .to_string(),
                tool_versions,
            },
            files: BTreeMap::new(),
        })
    }

    /// Writes the manifest as canonical JSON.
    pub fn write(&self, path: &Path) -> Result<(), HhcfError> {
        let bytes = to_canonical_json_bytes(self)?;
        fs::write(path, bytes).map_err(|err| io_error("manifest-write", path, err))
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, HhcfError> {
        let contents = fs::read(path).map_err(|err| io_error("manifest-read", path, err))?;
        serde_json::from_slice(&contents).map_err(|err| {
            HhcfError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}
