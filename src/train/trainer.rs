use crate::{
    error::{NetworkError, Result},
    loss::squared::HalfSquaredError,
    network::network::Network,
    optim::sgd::Sgd,
};

/// Trains `network` on a single case and returns that case's error,
/// measured on the output produced before the weights moved.
///
/// The backward pass walks connection layers from the output side toward
/// the input side. For each layer `n >= 1` it folds `psi[n + 1]` back into
/// `psi[n]` and, in the same sweep, applies the updates to the edges
/// `n -> n + 1`; weight layer `n` is not read again for this case, so the
/// interleaving is safe. The input-side layer `0` is updated last.
pub fn train_case(network: &mut Network, input: &[f64], expected: &[f64], optimizer: &Sgd) -> Result<f64> {
    let output_width = network.topology().output_width();
    if expected.len() != output_width {
        return Err(NetworkError::Shape { expected: output_width, found: expected.len() });
    }

    network.evaluate(input)?;
    let error = HalfSquaredError::loss(network.output(), expected);

    let layer_count = network.topology().layer_count();
    let Network { weights, activation, activations, thetas, psi } = network;

    // Output layer: psi = omega * f'(theta).
    let omega = HalfSquaredError::omega(&activations[layer_count], expected);
    for (i, o) in omega.iter().enumerate() {
        psi[layer_count][i] = o * activation.derivative(thetas[layer_count][i]);
    }

    // Hidden layers, output side first.
    for n in (1..layer_count).rev() {
        let (lower, upper) = psi.split_at_mut(n + 1);
        let downstream = &upper[0];
        for (j, psi_j) in lower[n].iter_mut().enumerate() {
            let mut capital_omega = 0.0;
            for (i, &psi_i) in downstream.iter().enumerate() {
                capital_omega += psi_i * weights.get(n, j, i);
                optimizer.step(weights, n, j, i, activations[n][j], psi_i);
            }
            *psi_j = activation.derivative(thetas[n][j]) * capital_omega;
        }
    }

    for (k, &a) in activations[0].iter().enumerate() {
        for (j, &psi_j) in psi[1].iter().enumerate() {
            optimizer.step(weights, 0, k, j, a, psi_j);
        }
    }

    Ok(error)
}
