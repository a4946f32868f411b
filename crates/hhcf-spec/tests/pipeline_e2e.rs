use hhcf_core::constants::TWO_PI;
use hhcf_core::errors::HhcfError;
use hhcf_spec::{
    accuracy_report, execute, run, AccuracyWindow, DerivedParameters, Field, FtNormalization,
    PhysicalParameters, RunOutputs, RunSink, SpectrumModel, TransformMethod,
};
use ndarray::Array1;

fn scenario(method: TransformMethod) -> PhysicalParameters {
    PhysicalParameters {
        temperature: 300.0,
        volumic_mass: 1000.0,
        surface_tension: 0.07,
        kappa: 1e-19,
        area: 1e-12,
        resolution: 256,
        is_accuracy_test: true,
        ft_normalization: FtNormalization::Symmetric,
        spectrum_function: SpectrumModel::Base,
        inverse_fourier_transform_method: method,
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Vec<&'static str>,
    derived: Option<DerivedParameters>,
    correlation_shape: Option<Vec<usize>>,
}

impl RunSink for RecordingSink {
    fn export_derived(
        &mut self,
        _parameters: &PhysicalParameters,
        derived: &DerivedParameters,
    ) -> Result<(), HhcfError> {
        self.events.push("derived");
        self.derived = Some(*derived);
        Ok(())
    }

    fn export_fields(&mut self, outputs: &RunOutputs) -> Result<(), HhcfError> {
        self.events.push("fields");
        self.correlation_shape = Some(outputs.correlation.shape().to_vec());
        Ok(())
    }
}

#[test]
fn planar_run_produces_aligned_fields() {
    let outputs = run(&scenario(TransformMethod::Real2d)).unwrap();
    assert_eq!(outputs.spectrum.shape(), &[256, 256]);
    assert_eq!(outputs.correlation.shape(), &[256, 256]);
    assert!(outputs.correlation.iter().all(f64::is_finite));
    assert!(outputs.spectrum.iter().all(|s| s > 0.0));
    let expected_factor = 1e-6 / TWO_PI;
    assert!((outputs.normalization_factor - expected_factor).abs() / expected_factor < 1e-12);

    let reference = outputs.reference.as_ref().unwrap();
    assert_eq!(reference.shape(), &[256, 256]);
    assert!(reference.iter().all(|c| c >= 0.0));
}

#[test]
fn accuracy_window_on_default_grid_is_fully_degenerate() {
    // With the distance grid reaching kilometres, the reference decays below
    // the smallest subnormal everywhere inside the central window.
    let outputs = run(&scenario(TransformMethod::Real2d)).unwrap();
    let report = outputs.accuracy.unwrap();
    assert_eq!(report.window, AccuracyWindow { start: 25, end: 231 });
    assert_eq!(report.compared, 0);
    assert_eq!(report.degenerate, 206 * 206);
    assert_eq!(report.max_relative_error, None);
    assert!(!report.within_tolerance);
}

#[test]
fn linear_run_stays_one_dimensional() {
    let outputs = run(&scenario(TransformMethod::Real1d)).unwrap();
    assert_eq!(outputs.correlation.shape(), &[256]);
    assert_eq!(outputs.grids.distance.axis().len(), 256);
    let report = outputs.accuracy.unwrap();
    assert_eq!(report.degenerate + report.compared, 206);
}

#[test]
fn plain_run_skips_reference() {
    let mut params = scenario(TransformMethod::Real2d);
    params.is_accuracy_test = false;
    params.resolution = 32;
    let outputs = run(&params).unwrap();
    assert!(outputs.reference.is_none());
    assert!(outputs.accuracy.is_none());
    assert_eq!(outputs.correlation.shape(), &[32, 32]);
}

#[test]
fn sink_receives_derived_then_fields() {
    let mut params = scenario(TransformMethod::Real2d);
    params.resolution = 64;
    let mut sink = RecordingSink::default();
    let outputs = execute(&params, &mut sink).unwrap();
    assert_eq!(sink.events, vec!["derived", "fields"]);
    assert_eq!(sink.derived, Some(outputs.derived));
    assert_eq!(sink.correlation_shape, Some(vec![64, 64]));
}

#[test]
fn failed_run_exports_nothing() {
    let mut params = scenario(TransformMethod::Real1d);
    params.surface_tension = -1.0;
    let mut sink = RecordingSink::default();
    let err = execute(&params, &mut sink).unwrap_err();
    assert!(matches!(err, HhcfError::InvalidParameter(_)));
    assert!(sink.events.is_empty());
}

#[test]
fn synthetic_report_measures_relative_error() {
    let reference = Field::OneD(Array1::from_elem(20, 2.0));
    let mut perturbed = Array1::from_elem(20, 2.0);
    perturbed[5] = 2.1;
    // outside the [2, 18) window
    perturbed[0] = 100.0;
    let report = accuracy_report(&Field::OneD(perturbed), &reference, 0.05).unwrap();
    assert_eq!(report.window, AccuracyWindow { start: 2, end: 18 });
    assert_eq!(report.compared, 16);
    assert_eq!(report.degenerate, 0);
    let max = report.max_relative_error.unwrap();
    assert!((max - 0.05).abs() < 1e-12);
    assert!((report.mean_relative_error.unwrap() - 0.05 / 16.0).abs() < 1e-12);

    let mismatch = accuracy_report(&Field::OneD(Array1::zeros(3)), &reference, 0.05);
    assert!(matches!(mismatch, Err(HhcfError::Numerical(_))));
}
