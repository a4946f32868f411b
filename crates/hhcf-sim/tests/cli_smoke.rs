use std::fs;
use std::process::Command;

use tempfile::tempdir;

const CONFIG: &str = "temperature: 300\nvolumic_mass: 1000\nsurface_tension: 0.07\n\
kappa: 1.0e-19\narea: 1.0e-12\nresolution: 32\nis_accuracy_test: true\n\
inverse_fourier_transform_method: inverse_fft\n";

fn hhcf_sim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hhcf-sim"))
}

#[test]
fn run_persists_and_refuses_second_write() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("params.yaml");
    fs::write(&config, CONFIG).unwrap();
    let out = dir.path().join("out");

    let status = hhcf_sim()
        .args(["run", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(out
        .join("base_spectrum_inverse_fft/output_paths.json")
        .is_file());

    let again = hhcf_sim()
        .args(["run", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();
    assert!(!again.status.success());

    let forced = hhcf_sim()
        .args(["--log-format", "json", "run", "--overwrite", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(forced.success());
}

#[test]
fn derive_prints_scales_as_json() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("params.yml");
    fs::write(&config, CONFIG).unwrap();
    let output = hhcf_sim()
        .args(["--log-level", "error", "derive", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let curvature = value["curvature_frequency"].as_f64().unwrap();
    assert!((curvature - (0.07f64 / 1e-19).sqrt()).abs() / curvature < 1e-12);
}

#[test]
fn unknown_model_exits_with_failure() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("params.yaml");
    fs::write(&config, format!("{CONFIG}spectrum_function: doesNotExist\n")).unwrap();
    let output = hhcf_sim()
        .args(["derive", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("doesNotExist"));
}
