use crate::error::{Result, SymgpError};

/// Exponent applied to node count in the complexity penalty.
pub const DEFAULT_COMPLEXITY_EXPONENT: f64 = 0.5;

pub fn mean_squared_error(predictions: &[f64], targets: &[f64]) -> Result<f64> {
    if predictions.len() != targets.len() {
        return Err(SymgpError::Schema(format!(
            "{} predictions for {} targets",
            predictions.len(),
            targets.len()
        )));
    }
    if targets.is_empty() {
        return Err(SymgpError::Schema("Cannot score against an empty target column".to_string()));
    }

    let sum: f64 = predictions
        .iter()
        .zip(targets)
        .map(|(p, t)| (p - t).powi(2))
        .sum();
    Ok(sum / targets.len() as f64)
}

/// `mse * size ^ exponent`. Lower is better.
///
/// A NaN score (overflowing predictions) is reported as `+inf` so that
/// comparisons during selection stay total.
pub fn fitness(
    size: usize,
    predictions: &[f64],
    targets: &[f64],
    complexity_exponent: f64,
) -> Result<f64> {
    let mse = mean_squared_error(predictions, targets)?;
    let score = mse * (size as f64).powf(complexity_exponent);
    Ok(if score.is_nan() { f64::INFINITY } else { score })
}

/// Median of a score vector; mean of the middle pair for even lengths.
pub fn median(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}
