pub struct MeanAbsoluteError;

impl MeanAbsoluteError {
    pub fn aggregate(expected: &[f64], obtained: &[f64]) -> f64 {
        let n = expected.len().max(1) as f64;
        expected.iter().zip(obtained).map(|(e, o)| (o - e).abs()).sum::<f64>() / n
    }

    /// |o - e| has no slope at o == e; that output gets 0 instead of ±1/n.
    pub fn gradient(expected: &[f64], obtained: &[f64]) -> Vec<f64> {
        let n = expected.len().max(1) as f64;
        expected.iter().zip(obtained)
            .map(|(e, o)| match o.partial_cmp(e) {
                Some(std::cmp::Ordering::Greater) => 1.0 / n,
                Some(std::cmp::Ordering::Less) => -1.0 / n,
                _ => 0.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_is_a_scaled_sign() {
        let g = MeanAbsoluteError::gradient(&[0.0, 1.0, 2.0, 3.0], &[1.0, 1.0, 0.0, 3.5]);
        assert_eq!(g, vec![0.25, 0.0, -0.25, 0.25]);
    }
}
