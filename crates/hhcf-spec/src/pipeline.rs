//! One batch run: parameters → grids → reference → spectrum → scaled inverse
//! transform → handoff.

use hhcf_core::errors::HhcfError;
use tracing::{debug, info, info_span};

use crate::accuracy::{accuracy_report, AccuracyReport, DEFAULT_TOLERANCE};
use crate::field::Field;
use crate::grid::{build_grids, Grids};
use crate::params::{derive_parameters, DerivedParameters, PhysicalParameters};
use crate::reference::reference_field;
use crate::spectrum::SpectrumInputs;

/// Everything a run produces. Immutable once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutputs {
    /// Input of the run.
    pub parameters: PhysicalParameters,
    /// Characteristic scales.
    pub derived: DerivedParameters,
    /// Wavevector and distance grids.
    pub grids: Grids,
    /// Factor applied to the inverse-transform output.
    pub normalization_factor: f64,
    /// Spectral density over the wavevector grid.
    pub spectrum: Field,
    /// Computed correlation, aligned with the distance grid.
    pub correlation: Field,
    /// Analytic reference, accuracy runs only.
    pub reference: Option<Field>,
    /// Agreement between `correlation` and `reference`, accuracy runs only.
    pub accuracy: Option<AccuracyReport>,
}

/// Collaborator receiving the results of a successful run.
pub trait RunSink {
    /// Receives the input and the derived scales.
    fn export_derived(
        &mut self,
        parameters: &PhysicalParameters,
        derived: &DerivedParameters,
    ) -> Result<(), HhcfError>;

    /// Receives the computed fields.
    fn export_fields(&mut self, outputs: &RunOutputs) -> Result<(), HhcfError>;
}

/// Computes all outputs of a run without touching any collaborator.
pub fn run(params: &PhysicalParameters) -> Result<RunOutputs, HhcfError> {
    let _span = info_span!("run", calculation = %params.calculation_name()).entered();

    let derived = derive_parameters(params)?;
    let grids = build_grids(&derived, params.resolution, params.dimensionality())?;
    debug!(
        resolution = params.resolution,
        dimensionality = ?params.dimensionality(),
        "built grids"
    );

    let reference = if params.is_accuracy_test {
        let field = reference_field(&grids.distance, params, &derived)?;
        debug!("evaluated reference correlation");
        Some(field)
    } else {
        None
    };

    let spectrum = params
        .spectrum_function
        .evaluate(&grids.frequency.magnitudes(), &SpectrumInputs::from(params))?;
    debug!(model = %params.spectrum_function, "evaluated spectrum");

    let transform = params
        .inverse_fourier_transform_method
        .inverse(params.resolution);
    let normalization_factor = params
        .ft_normalization
        .factor_for(params.area, transform.scaling())?;
    let correlation = transform
        .transform(&spectrum)?
        .leading_block(params.resolution)?
        .scaled(normalization_factor);
    correlation.ensure_finite("correlation")?;
    debug!(
        method = %params.inverse_fourier_transform_method,
        normalization = %params.ft_normalization,
        normalization_factor,
        "computed correlation"
    );

    let accuracy = match &reference {
        Some(reference) => Some(accuracy_report(&correlation, reference, DEFAULT_TOLERANCE)?),
        None => None,
    };
    if let Some(report) = &accuracy {
        info!(
            compared = report.compared,
            degenerate = report.degenerate,
            max_relative_error = ?report.max_relative_error,
            within_tolerance = report.within_tolerance,
            "accuracy check"
        );
    }

    Ok(RunOutputs {
        parameters: *params,
        derived,
        grids,
        normalization_factor,
        spectrum,
        correlation,
        reference,
        accuracy,
    })
}

/// Runs the pipeline and, only once every stage has succeeded, hands the
/// derived scales and then the fields to `sink`.
pub fn execute(
    params: &PhysicalParameters,
    sink: &mut dyn RunSink,
) -> Result<RunOutputs, HhcfError> {
    let outputs = run(params)?;
    sink.export_derived(&outputs.parameters, &outputs.derived)?;
    sink.export_fields(&outputs)?;
    info!(calculation = %params.calculation_name(), "run exported");
    Ok(outputs)
}
