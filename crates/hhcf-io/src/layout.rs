//! On-disk layout of one calculation:
//!
//! ```text
//! <root>/<spectrum_function>_<method>/
//!     parameters.json
//!     computed_parameters.json
//!     accuracy_report.json        (accuracy runs)
//!     output_paths.json
//!     datas/computed_correlation.csv
//!     datas/frequency_spectrum.csv
//!     datas/true_correlation.csv  (accuracy runs)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use hhcf_core::errors::{ErrorInfo, HhcfError};
use hhcf_spec::{
    to_canonical_json_bytes, DerivedParameters, PhysicalParameters, RunOutputs, RunSink,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::io_error;
use crate::manifest::RunManifest;
use crate::tables::{write_correlation_table, write_spectrum_table};

/// Subdirectory holding the CSV tables.
pub const DATA_DIR: &str = "datas";

const PARAMETERS_FILE: &str = "parameters.json";
const COMPUTED_PARAMETERS_FILE: &str = "computed_parameters.json";
const ACCURACY_FILE: &str = "accuracy_report.json";
const MANIFEST_FILE: &str = "output_paths.json";
const CORRELATION_TABLE: &str = "computed_correlation.csv";
const SPECTRUM_TABLE: &str = "frequency_spectrum.csv";
const REFERENCE_TABLE: &str = "true_correlation.csv";

/// Run sink persisting a calculation under `<root>/<calculation name>`.
#[derive(Debug)]
pub struct CalculationDirectory {
    path: PathBuf,
    overwrite: bool,
    manifest: Option<RunManifest>,
}

impl CalculationDirectory {
    /// Targets `<root>/<params.calculation_name()>`. Nothing is touched
    /// until the sink receives its first export.
    pub fn new(root: &Path, params: &PhysicalParameters, overwrite: bool) -> Self {
        Self {
            path: root.join(params.calculation_name()),
            overwrite,
            manifest: None,
        }
    }

    /// The calculation directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The table subdirectory.
    pub fn data_path(&self) -> PathBuf {
        self.path.join(DATA_DIR)
    }

    /// Path of the run manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(MANIFEST_FILE)
    }

    /// Fails if the directory exists and may not be overwritten.
    pub fn ensure_available(&self) -> Result<(), HhcfError> {
        if self.path.exists() && !self.overwrite {
            return Err(HhcfError::Io(
                ErrorInfo::new("calculation-exists", "calculation directory already exists")
                    .with_context("path", self.path.display().to_string())
                    .with_hint("pass --overwrite to replace it"),
            ));
        }
        Ok(())
    }

    fn prepare(&self) -> Result<(), HhcfError> {
        self.ensure_available()?;
        if self.path.exists() {
            fs::remove_dir_all(&self.path)
                .map_err(|err| io_error("calculation-clear", &self.path, err))?;
            debug!(path = %self.path.display(), "cleared previous calculation");
        }
        let data = self.data_path();
        fs::create_dir_all(&data).map_err(|err| io_error("calculation-mkdir", &data, err))
    }

    fn write_json<T: Serialize>(&mut self, role: &str, name: &str, value: &T) -> Result<(), HhcfError> {
        let path = self.path.join(name);
        let bytes = to_canonical_json_bytes(value)?;
        fs::write(&path, bytes).map_err(|err| io_error("json-write", &path, err))?;
        self.record(role, PathBuf::from(name));
        Ok(())
    }

    fn record(&mut self, role: &str, relative: PathBuf) {
        if let Some(manifest) = self.manifest.as_mut() {
            manifest.files.insert(role.to_string(), relative);
        }
    }

    fn table_path(&self, name: &str) -> (PathBuf, PathBuf) {
        let relative = Path::new(DATA_DIR).join(name);
        (self.path.join(&relative), relative)
    }
}

impl RunSink for CalculationDirectory {
    fn export_derived(
        &mut self,
        parameters: &PhysicalParameters,
        derived: &DerivedParameters,
    ) -> Result<(), HhcfError> {
        self.prepare()?;
        self.manifest = Some(RunManifest::for_parameters(parameters)?);
        self.write_json("parameters", PARAMETERS_FILE, parameters)?;
        self.write_json("computed_parameters", COMPUTED_PARAMETERS_FILE, derived)?;
        Ok(())
    }

    fn export_fields(&mut self, outputs: &RunOutputs) -> Result<(), HhcfError> {
        if self.manifest.is_none() {
            return Err(HhcfError::Io(
                ErrorInfo::new("export-order", "fields exported before derived parameters")
                    .with_context("path", self.path.display().to_string()),
            ));
        }

        let (path, relative) = self.table_path(CORRELATION_TABLE);
        let rows = write_correlation_table(&path, &outputs.grids.distance, &outputs.correlation)?;
        self.record("computed_correlation", relative);
        debug!(rows, path = %path.display(), "wrote correlation table");

        let (path, relative) = self.table_path(SPECTRUM_TABLE);
        write_spectrum_table(&path, &outputs.grids.frequency, &outputs.spectrum)?;
        self.record("frequency_spectrum", relative);

        if let Some(reference) = &outputs.reference {
            let (path, relative) = self.table_path(REFERENCE_TABLE);
            write_correlation_table(&path, &outputs.grids.distance, reference)?;
            self.record("true_correlation", relative);
        }
        if let Some(report) = &outputs.accuracy {
            self.write_json("accuracy_report", ACCURACY_FILE, report)?;
        }

        let manifest_path = self.manifest_path();
        if let Some(manifest) = self.manifest.as_mut() {
            manifest
                .files
                .insert("manifest".to_string(), PathBuf::from(MANIFEST_FILE));
            manifest.write(&manifest_path)?;
        }
        info!(path = %self.path.display(), "calculation written");
        Ok(())
    }
}
