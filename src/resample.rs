use ndarray::{Array2, ArrayView1};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResampleError {
    #[error("cannot resample an empty segment")]
    EmptySegment,
}

/// Maps a variable-length N×C segment to a fixed `target_length`×C window by
/// piecewise-linear interpolation, independently per channel.
///
/// Both the source and target sample positions are evenly spaced over [0, 1],
/// so no extrapolation can occur. A length-N match returns the input
/// unchanged; a single-row segment repeats that row. An empty segment is an
/// upstream segmentation bug and is surfaced as an error, not recovered.
pub fn resample(segment: &Array2<f64>, target_length: usize) -> Result<Array2<f64>, ResampleError> {
    let n = segment.nrows();
    if n == 0 {
        return Err(ResampleError::EmptySegment);
    }
    if n == target_length {
        return Ok(segment.clone());
    }

    let channels = segment.ncols();
    let mut out = Array2::zeros((target_length, channels));
    for channel in 0..channels {
        let column = segment.column(channel);
        for row in 0..target_length {
            let t = if target_length > 1 {
                row as f64 / (target_length - 1) as f64
            } else {
                0.0
            };
            out[[row, channel]] = sample_linear(column, t);
        }
    }
    Ok(out)
}

/// Value of `column` at normalized position `t` in [0, 1], with the column's
/// own samples evenly spaced over the same interval.
fn sample_linear(column: ArrayView1<f64>, t: f64) -> f64 {
    let n = column.len();
    if n == 1 {
        return column[0];
    }
    let position = t * (n - 1) as f64;
    let index = position.floor() as usize;
    if index >= n - 1 {
        return column[n - 1];
    }
    let frac = position - index as f64;
    column[index] + (column[index + 1] - column[index]) * frac
}
