use nlayer::{train_loop, ActivationFunction, Dataset, Network, StopReason, Topology, TrainConfig};
use rand::{rngs::StdRng, SeedableRng};

fn main() -> nlayer::Result<()> {
    env_logger::init();

    let topology = Topology::from_widths(&[2, 4, 1])?;
    let dataset = Dataset::new(&topology, vec![
        (vec![0.0, 0.0], vec![0.0]),
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 0.0], vec![1.0]),
        (vec![1.0, 1.0], vec![0.0]),
    ])?;

    let mut network = Network::new(&topology, ActivationFunction::Sigmoid);
    network.weights_mut().randomize(-1.5, 1.5, &mut StdRng::seed_from_u64(2023))?;

    let config = TrainConfig::new(0.3, 100_000, 0.0002).with_keep_alive(10_000);
    let outcome = train_loop(&mut network, &dataset, &config)?;

    match outcome.reason {
        StopReason::Converged => println!("Converged after {} epochs", outcome.epochs),
        StopReason::Exhausted => println!("Gave up after {} epochs", outcome.epochs),
    }
    println!("Mean error: {:.6}", outcome.mean_error);

    for (input, _) in dataset.cases() {
        println!("Input: {:?} -> Output: {:.4}", input, network.evaluate(input)?[0]);
    }
    Ok(())
}
