use crate::network::weights::WeightStore;

/// Steepest-descent step with a fixed learning rate (lambda).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// `weight[n][k][j] += lambda * activation * psi`, where `activation` is
    /// unit `k` of layer `n` and `psi` the sensitivity of unit `j` of layer `n + 1`.
    pub fn step(&self, weights: &mut WeightStore, n: usize, k: usize, j: usize, activation: f64, psi: f64) {
        weights.add(n, k, j, self.learning_rate * activation * psi);
    }
}
