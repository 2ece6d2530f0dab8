use std::fs;
use std::path::PathBuf;

use nlayer::{
    report, train_loop, ActivationFunction, Dataset, Mode, Network, NetworkError, RunConfig,
    Topology, TrainConfig, WeightSource, WeightStore,
};
use rand::{rngs::StdRng, SeedableRng};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nlayer-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn trained_weights_survive_a_file_round_trip() {
    let topology = Topology::from_widths(&[2, 3, 1]).unwrap();
    let ds = Dataset::new(
        &topology,
        vec![
            (vec![0.0, 0.0], vec![0.0]),
            (vec![0.0, 1.0], vec![1.0]),
            (vec![1.0, 0.0], vec![1.0]),
            (vec![1.0, 1.0], vec![1.0]),
        ],
    )
    .unwrap();

    let mut net = Network::new(&topology, ActivationFunction::Sigmoid);
    net.weights_mut()
        .randomize(-1.5, 1.5, &mut StdRng::seed_from_u64(4))
        .unwrap();
    train_loop(&mut net, &ds, &TrainConfig::new(0.3, 500, 0.0)).unwrap();

    let path = scratch("or.weights");
    net.weights().save_file(&path).unwrap();
    let first_line = fs::read_to_string(&path).unwrap().lines().next().unwrap().to_string();
    assert_eq!(first_line, "2-3-1");

    let mut restored = Network::new(&topology, ActivationFunction::Sigmoid);
    restored.weights_mut().load_file(&path).unwrap();
    assert_eq!(restored.weights(), net.weights());
    assert_eq!(restored.run_all(&ds).unwrap(), net.run_all(&ds).unwrap());
}

#[test]
fn loading_into_another_topology_fails() {
    let saved = WeightStore::zeros(&Topology::from_widths(&[2, 3, 1]).unwrap());
    let path = scratch("mismatch.weights");
    saved.save_file(&path).unwrap();

    let mut other = WeightStore::zeros(&Topology::from_widths(&[2, 2, 1]).unwrap());
    let err = other.load_file(&path).unwrap_err();
    match err {
        NetworkError::InFile { source, .. } => {
            assert!(matches!(*source, NetworkError::TopologyMismatch { .. }))
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn run_config_drives_a_full_training_session() {
    let cases = scratch("and_cases.txt");
    fs::write(&cases, "0 0 0\n0 1 0\n1 0 0\n1 1 1\n").unwrap();
    let weights_out = scratch("and_out.weights");

    let config = RunConfig {
        widths: vec![2, 5, 1],
        layers: None,
        case_file: cases.clone(),
        case_count: 4,
        weights: WeightSource::Randomize { min: -1.5, max: 1.5 },
        save_weights: Some(weights_out.clone()),
        learning_rate: 0.3,
        max_iterations: 100_000,
        error_threshold: 0.001,
        keep_alive_interval: 0,
        mode: Mode::Train,
        show_inputs: true,
        activation: ActivationFunction::Sigmoid,
        seed: Some(1),
    };
    let config_path = scratch("and.json");
    config.save_json(&config_path).unwrap();

    let config = RunConfig::load_json(&config_path).unwrap();
    config.validate().unwrap();
    let topology = config.topology().unwrap();
    let ds = Dataset::load_file(&config.case_file, &topology, config.case_count).unwrap();
    let mut net = config.build_network().unwrap();

    let echo = report::config_echo(&config, &topology, &ds);
    assert!(echo.contains("Activations: 2-5-1"));
    assert!(echo.contains("Lambda value: 0.3"));

    let outcome = train_loop(&mut net, &ds, &config.train_config()).unwrap();
    assert!(outcome.converged());
    net.weights().save_file(config.save_weights.as_ref().unwrap()).unwrap();

    // Run mode with the saved weights reproduces the trained outputs.
    let mut run_config = config.clone();
    run_config.mode = Mode::Run;
    run_config.weights = WeightSource::Load { path: weights_out };
    let mut reloaded = run_config.build_network().unwrap();
    let outputs = reloaded.run_all(&ds).unwrap();
    assert_eq!(outputs, net.run_all(&ds).unwrap());

    let table = report::truth_table(&ds, &outputs, true);
    assert_eq!(table.lines().count(), 4);
    assert!(table.lines().all(|l| l.contains("| ")));
}
