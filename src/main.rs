use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use log::{error, info};

use nlayer::{report, train_loop, Dataset, Mode, Result, RunConfig};

const DEFAULT_CONFIG_FILE: &str = "./network.json";

fn main() {
    env_logger::init();

    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if let Err(e) = run(config_path) {
        error!("{e}");
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(config_path: PathBuf) -> Result<()> {
    info!("reading configuration from {}", config_path.display());
    let config = RunConfig::load_json(&config_path)?;
    config.validate()?;

    let topology = config.topology()?;
    let dataset = Dataset::load_file(&config.case_file, &topology, config.case_count)?;
    let mut network = config.build_network()?;

    println!("Configuration file: '{}'", config_path.display());
    print!("{}", report::config_echo(&config, &topology, &dataset));
    println!("-------------------------");

    match config.mode {
        Mode::Run => {
            let outputs = network.run_all(&dataset)?;
            println!("\nTRUTH TABLE (F)");
            print!("{}", report::truth_table(&dataset, &outputs, config.show_inputs));
        }
        Mode::Train => {
            let t_start = Instant::now();
            let outcome = train_loop(&mut network, &dataset, &config.train_config())?;
            info!("training wall time {} ms", t_start.elapsed().as_millis());

            let outputs = network.run_all(&dataset)?;
            println!("\nTRUTH TABLE (F)");
            print!("{}", report::truth_table(&dataset, &outputs, config.show_inputs));

            if let Some(ref path) = config.save_weights {
                network.weights().save_file(path)?;
                info!("weights saved to {}", path.display());
            }

            println!();
            print!("{}", report::exit_info(&outcome));
        }
    }
    Ok(())
}
