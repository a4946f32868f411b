//! CSV tables of the sampled fields, one row per grid point in row-major order.

use std::path::Path;

use hhcf_core::errors::{ErrorInfo, HhcfError};
use hhcf_spec::{Field, Grid};

use crate::io_error;

const CORRELATION_HEADERS_1D: [&str; 2] = ["distance", "correlation_function"];
const CORRELATION_HEADERS_2D: [&str; 4] = ["x", "y", "distance", "correlation_function"];
const SPECTRUM_HEADERS_1D: [&str; 2] = ["frequency", "spectrum"];
const SPECTRUM_HEADERS_2D: [&str; 4] = ["kx", "ky", "norm", "spectrum"];

fn csv_error(path: &Path, err: csv::Error) -> HhcfError {
    if err.is_io_error() {
        io_error("table-write", path, err)
    } else {
        HhcfError::Serde(
            ErrorInfo::new("table-encode", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    }
}

fn write_table(
    path: &Path,
    grid: &Grid,
    values: &Field,
    headers_1d: &[&str],
    headers_2d: &[&str],
) -> Result<usize, HhcfError> {
    let magnitudes = grid.magnitudes();
    if magnitudes.shape() != values.shape() {
        return Err(HhcfError::Numerical(
            ErrorInfo::new("shape-mismatch", "field does not match its grid")
                .with_context("grid", format!("{:?}", magnitudes.shape()))
                .with_context("field", format!("{:?}", values.shape()))
                .with_context("path", path.display().to_string()),
        ));
    }

    let mut wtr = csv::Writer::from_path(path).map_err(|err| csv_error(path, err))?;
    match values {
        Field::OneD(_) => {
            wtr.write_record(headers_1d)
                .map_err(|err| csv_error(path, err))?;
            for (r, v) in magnitudes.iter().zip(values.iter()) {
                wtr.serialize((r, v)).map_err(|err| csv_error(path, err))?;
            }
        }
        Field::TwoD(_) => {
            wtr.write_record(headers_2d)
                .map_err(|err| csv_error(path, err))?;
            let (x, y) = grid.components();
            let rows = x.iter().zip(y.iter()).zip(magnitudes.iter()).zip(values.iter());
            for (((x, y), r), v) in rows {
                wtr.serialize((x, y, r, v))
                    .map_err(|err| csv_error(path, err))?;
            }
        }
    }
    wtr.flush().map_err(|err| io_error("table-write", path, err))?;
    Ok(values.len())
}

/// Writes a correlation field sampled on the distance grid. Returns the row count.
pub fn write_correlation_table(
    path: &Path,
    distance: &Grid,
    correlation: &Field,
) -> Result<usize, HhcfError> {
    write_table(
        path,
        distance,
        correlation,
        &CORRELATION_HEADERS_1D,
        &CORRELATION_HEADERS_2D,
    )
}

/// Writes a spectral density sampled on the wavevector grid. Returns the row count.
pub fn write_spectrum_table(
    path: &Path,
    frequency: &Grid,
    spectrum: &Field,
) -> Result<usize, HhcfError> {
    write_table(
        path,
        frequency,
        spectrum,
        &SPECTRUM_HEADERS_1D,
        &SPECTRUM_HEADERS_2D,
    )
}
