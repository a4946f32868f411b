use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hhcf_io::{load_parameters, CalculationDirectory};
use hhcf_spec::execute;
use tracing::info;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Parameter file (.json, .yaml or .yml).
    #[arg(long)]
    pub config: PathBuf,
    /// Root directory receiving the calculation directory.
    #[arg(long)]
    pub out: PathBuf,
    /// Replace an existing calculation directory.
    #[arg(long)]
    pub overwrite: bool,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let params = load_parameters(&args.config)?;
    let mut sink = CalculationDirectory::new(&args.out, &params, args.overwrite);
    // Refuse early rather than after the transform.
    sink.ensure_available()?;

    info!(config = %args.config.display(), "starting run");
    let outputs = execute(&params, &mut sink)?;

    println!(
        "{}: {} correlation samples written to {}",
        params.calculation_name(),
        outputs.correlation.len(),
        sink.path().display()
    );
    if let Some(report) = &outputs.accuracy {
        match report.max_relative_error {
            Some(max) => println!(
                "accuracy: {} cells compared, max relative error {:.3e} (tolerance {}) -> {}",
                report.compared,
                max,
                report.tolerance,
                if report.within_tolerance { "ok" } else { "exceeded" }
            ),
            None => println!(
                "accuracy: no comparable cells ({} reference values underflow)",
                report.degenerate
            ),
        }
    }
    Ok(())
}
