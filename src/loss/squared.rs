/// Per-case error `½ Σ_i (expected_i - output_i)²`.
pub struct HalfSquaredError;

impl HalfSquaredError {
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(f, t)| (t - f) * (t - f))
            .sum::<f64>() / 2.0
    }

    /// `omega_i = expected_i - output_i`, the signal the backward pass starts from.
    pub fn omega(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(f, t)| t - f)
            .collect()
    }

    /// Mean of the per-case error over a set of cases; `0.0` for no cases.
    pub fn mean(outputs: &[Vec<f64>], expected: &[Vec<f64>]) -> f64 {
        if outputs.is_empty() {
            return 0.0;
        }
        let total: f64 = outputs.iter().zip(expected.iter())
            .map(|(f, t)| HalfSquaredError::loss(f, t))
            .sum();
        total / outputs.len() as f64
    }
}
