// Prints one case-file line built from an image:
//   img2cases <width> <height> <image> <expected...>
// Append the output of several runs to assemble a case file.
use std::env;
use std::process;

use log::error;

use nlayer::preprocess::{case_line, image_to_intensities};
use nlayer::{NetworkError, Result};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("usage: img2cases <width> <height> <image> <expected...>");
        process::exit(2);
    }

    match convert(&args) {
        Ok(line) => println!("{line}"),
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn convert(args: &[String]) -> Result<String> {
    let width = parse_dim(&args[0])?;
    let height = parse_dim(&args[1])?;
    let expected = args[3..]
        .iter()
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| NetworkError::Configuration(format!("'{s}' is not a number")))
        })
        .collect::<Result<Vec<f64>>>()?;

    let inputs = image_to_intensities(&args[2], width, height)?;
    Ok(case_line(&inputs, &expected))
}

fn parse_dim(s: &str) -> Result<u32> {
    match s.parse::<u32>() {
        Ok(d) if d > 0 => Ok(d),
        _ => Err(NetworkError::Configuration(format!("'{s}' is not a positive image dimension"))),
    }
}
