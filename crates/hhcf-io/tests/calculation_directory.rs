use std::fs;
use std::path::Path;

use hhcf_core::errors::HhcfError;
use hhcf_io::{load_parameters, CalculationDirectory, RunManifest};
use hhcf_spec::{
    execute, stable_hash_string, FtNormalization, PhysicalParameters, SpectrumModel,
    TransformMethod,
};
use tempfile::tempdir;

fn params(method: TransformMethod, accuracy: bool) -> PhysicalParameters {
    PhysicalParameters {
        temperature: 300.0,
        volumic_mass: 1000.0,
        surface_tension: 0.07,
        kappa: 1e-19,
        area: 1e-12,
        resolution: 16,
        is_accuracy_test: accuracy,
        ft_normalization: FtNormalization::Symmetric,
        spectrum_function: SpectrumModel::Base,
        inverse_fourier_transform_method: method,
    }
}

fn read_table(path: &Path) -> (Vec<String>, usize) {
    let mut reader = csv::Reader::from_path(path).expect("open table");
    let headers = reader
        .headers()
        .expect("headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader.records().map(|r| r.expect("row")).count();
    (headers, rows)
}

#[test]
fn planar_accuracy_run_writes_full_layout() {
    let root = tempdir().unwrap();
    let p = params(TransformMethod::Real2d, true);
    let mut sink = CalculationDirectory::new(root.path(), &p, false);
    execute(&p, &mut sink).unwrap();

    let dir = root.path().join("base_spectrum_inverse_fft");
    assert_eq!(sink.path(), dir.as_path());
    for name in [
        "parameters.json",
        "computed_parameters.json",
        "accuracy_report.json",
        "output_paths.json",
        "datas/computed_correlation.csv",
        "datas/frequency_spectrum.csv",
        "datas/true_correlation.csv",
    ] {
        assert!(dir.join(name).is_file(), "missing {name}");
    }

    let (headers, rows) = read_table(&dir.join("datas/computed_correlation.csv"));
    assert_eq!(headers, ["x", "y", "distance", "correlation_function"]);
    assert_eq!(rows, 16 * 16);
    let (headers, rows) = read_table(&dir.join("datas/frequency_spectrum.csv"));
    assert_eq!(headers, ["kx", "ky", "norm", "spectrum"]);
    assert_eq!(rows, 16 * 16);
}

#[test]
fn linear_run_uses_single_axis_headers_and_skips_reference() {
    let root = tempdir().unwrap();
    let p = params(TransformMethod::Real1d, false);
    let mut sink = CalculationDirectory::new(root.path(), &p, false);
    execute(&p, &mut sink).unwrap();

    let data = sink.data_path();
    let (headers, rows) = read_table(&data.join("computed_correlation.csv"));
    assert_eq!(headers, ["distance", "correlation_function"]);
    assert_eq!(rows, 16);
    let (headers, _) = read_table(&data.join("frequency_spectrum.csv"));
    assert_eq!(headers, ["frequency", "spectrum"]);
    assert!(!data.join("true_correlation.csv").exists());
    assert!(!sink.path().join("accuracy_report.json").exists());
}

#[test]
fn manifest_indexes_files_and_hashes_input() {
    let root = tempdir().unwrap();
    let p = params(TransformMethod::Real2d, true);
    let mut sink = CalculationDirectory::new(root.path(), &p, false);
    execute(&p, &mut sink).unwrap();

    let manifest = RunManifest::load(&sink.manifest_path()).unwrap();
    assert_eq!(manifest.calculation, "base_spectrum_inverse_fft");
    assert_eq!(manifest.provenance.input_hash, stable_hash_string(&p).unwrap());
    assert_eq!(manifest.provenance.spectrum_function, "base_spectrum");
    assert!(manifest.provenance.tool_versions.contains_key("hhcf-spec"));
    for relative in manifest.files.values() {
        assert!(sink.path().join(relative).is_file(), "{relative:?} not written");
    }
    assert!(manifest.files.contains_key("true_correlation"));
}

#[test]
fn persisted_parameters_reload_identically() {
    let root = tempdir().unwrap();
    let p = params(TransformMethod::Real1d, true);
    let mut sink = CalculationDirectory::new(root.path(), &p, false);
    execute(&p, &mut sink).unwrap();

    let reloaded = load_parameters(&sink.path().join("parameters.json")).unwrap();
    assert_eq!(reloaded, p);
}

#[test]
fn existing_calculation_is_kept_without_overwrite() {
    let root = tempdir().unwrap();
    let p = params(TransformMethod::Real1d, false);
    execute(&p, &mut CalculationDirectory::new(root.path(), &p, false)).unwrap();

    let mut again = CalculationDirectory::new(root.path(), &p, false);
    assert!(again.ensure_available().is_err());
    let err = execute(&p, &mut again).unwrap_err();
    assert!(matches!(err, HhcfError::Io(_)));
    assert_eq!(err.info().code, "calculation-exists");
}

#[test]
fn overwrite_replaces_previous_contents() {
    let root = tempdir().unwrap();
    let p = params(TransformMethod::Real1d, false);
    let mut first = CalculationDirectory::new(root.path(), &p, false);
    execute(&p, &mut first).unwrap();
    let stale = first.path().join("stale.txt");
    fs::write(&stale, "left over").unwrap();

    let mut second = CalculationDirectory::new(root.path(), &p, true);
    execute(&p, &mut second).unwrap();
    assert!(!stale.exists());
    assert!(second.manifest_path().is_file());
}

#[test]
fn failed_run_leaves_no_directory() {
    let root = tempdir().unwrap();
    let mut p = params(TransformMethod::Real1d, false);
    p.kappa = -1.0;
    let mut sink = CalculationDirectory::new(root.path(), &p, false);
    assert!(execute(&p, &mut sink).is_err());
    assert!(!sink.path().exists());
}
