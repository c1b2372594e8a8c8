/// Sum of squared differences over the output vector. No averaging and no
/// 1/2 factor: this is the per-sample loss the trainer reports by default.
pub struct SumSquaredError;

impl SumSquaredError {
    pub fn aggregate(expected: &[f64], obtained: &[f64]) -> f64 {
        expected.iter().zip(obtained)
            .map(|(e, o)| (e - o) * (e - o))
            .sum()
    }

    /// d/d(obtained) with the constant 2 folded into the learning rate.
    pub fn gradient(expected: &[f64], obtained: &[f64]) -> Vec<f64> {
        expected.iter().zip(obtained)
            .map(|(e, o)| o - e)
            .collect()
    }
}
