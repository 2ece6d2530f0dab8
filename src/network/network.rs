use crate::activation::activation::ActivationFunction;
use crate::dataset::dataset::Dataset;
use crate::error::{NetworkError, Result};
use crate::network::topology::Topology;
use crate::network::weights::WeightStore;

/// A fully-connected feed-forward network plus its per-case scratch space.
///
/// The activation, theta and psi buffers are sized once from the topology
/// and overwritten by every forward/backward pass; index `n` always refers
/// to layer `n` (entry 0 of `thetas` and `psi` is allocated but unused).
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) weights: WeightStore,
    pub(crate) activation: ActivationFunction,
    pub(crate) activations: Vec<Vec<f64>>,
    pub(crate) thetas: Vec<Vec<f64>>,
    pub(crate) psi: Vec<Vec<f64>>,
}

impl Network {
    /// Network with all-zero weights.
    pub fn new(topology: &Topology, activation: ActivationFunction) -> Network {
        Network::with_weights(WeightStore::zeros(topology), activation)
    }

    pub fn with_weights(weights: WeightStore, activation: ActivationFunction) -> Network {
        let buffers = || -> Vec<Vec<f64>> {
            weights.topology().widths().iter().map(|&w| vec![0.0; w]).collect()
        };
        Network {
            activations: buffers(),
            thetas: buffers(),
            psi: buffers(),
            weights,
            activation,
        }
    }

    pub fn topology(&self) -> &Topology {
        self.weights.topology()
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn weights(&self) -> &WeightStore {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut WeightStore {
        &mut self.weights
    }

    /// Forward pass for one case; returns the output layer's activations.
    ///
    /// Every layer's theta is cached before its activation is derived, so a
    /// backward pass may follow immediately.
    pub fn evaluate(&mut self, input: &[f64]) -> Result<&[f64]> {
        let layer_count = self.topology().layer_count();
        if input.len() != self.topology().input_width() {
            return Err(NetworkError::Shape {
                expected: self.topology().input_width(),
                found: input.len(),
            });
        }
        self.activations[0].copy_from_slice(input);

        for n in 0..layer_count {
            let block = self.weights.layer(n);
            let (lower, upper) = self.activations.split_at_mut(n + 1);
            let source = &lower[n];
            let dest = &mut upper[0];
            for (j, (theta, a)) in self.thetas[n + 1].iter_mut().zip(dest.iter_mut()).enumerate() {
                let mut dot = 0.0;
                for (k, &x) in source.iter().enumerate() {
                    dot += x * block.get(k, j);
                }
                *theta = dot;
                *a = self.activation.function(dot);
            }
        }

        Ok(self.activations[layer_count].as_slice())
    }

    /// Output layer activations of the most recent pass.
    pub fn output(&self) -> &[f64] {
        &self.activations[self.topology().layer_count()]
    }

    /// Evaluates every case in dataset order.
    pub fn run_all(&mut self, dataset: &Dataset) -> Result<Vec<Vec<f64>>> {
        dataset
            .inputs()
            .iter()
            .map(|input| self.evaluate(input).map(|out| out.to_vec()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;

    #[test]
    fn zero_weights_give_one_half_everywhere() {
        for widths in [&[2usize, 1][..], &[3, 4, 2][..], &[5, 3, 3, 4, 2][..]] {
            let t = Topology::from_widths(widths).unwrap();
            let mut net = Network::new(&t, ActivationFunction::Sigmoid);
            for input in [vec![0.0; widths[0]], vec![7.5; widths[0]], vec![-3.0; widths[0]]] {
                let out = net.evaluate(&input).unwrap();
                assert_eq!(out.len(), *widths.last().unwrap());
                assert!(out.iter().all(|&o| o == 0.5));
            }
        }
    }

    #[test]
    fn hand_computed_two_layer_pass() {
        let t = Topology::from_widths(&[2, 2, 1]).unwrap();
        let w0 = Matrix { rows: 2, cols: 2, data: vec![vec![1.0, -1.0], vec![0.5, 2.0]] };
        let w1 = Matrix { rows: 2, cols: 1, data: vec![vec![1.5], vec![-0.5]] };
        let weights = WeightStore::from_layers(&t, vec![w0, w1]).unwrap();
        let mut net = Network::with_weights(weights, ActivationFunction::Sigmoid);

        let f = |x: f64| 1.0 / (1.0 + (-x).exp());
        let h0 = f(1.0 * 1.0 + 2.0 * 0.5);
        let h1 = f(1.0 * -1.0 + 2.0 * 2.0);
        let expected = f(h0 * 1.5 + h1 * -0.5);

        let out = net.evaluate(&[1.0, 2.0]).unwrap()[0];
        assert!((out - expected).abs() < 1e-15);
        assert_eq!(net.thetas[1], vec![2.0, 3.0]);
        assert_eq!(net.activations[1], vec![h0, h1]);
    }

    #[test]
    fn wrong_input_length_is_shape_error() {
        let t = Topology::from_widths(&[3, 1]).unwrap();
        let mut net = Network::new(&t, ActivationFunction::Sigmoid);
        let err = net.evaluate(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, NetworkError::Shape { expected: 3, found: 2 }));
    }
}
