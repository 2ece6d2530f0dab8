use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{NetworkError, Result};
use crate::network::topology::Topology;

/// Ordered input/expected-output pairs, read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    inputs: Vec<Vec<f64>>,
    expected: Vec<Vec<f64>>,
}

impl Dataset {
    /// Builds a dataset from in-memory cases, checking every vector against
    /// the topology's input and output widths.
    pub fn new(topology: &Topology, cases: Vec<(Vec<f64>, Vec<f64>)>) -> Result<Dataset> {
        let mut inputs = Vec::with_capacity(cases.len());
        let mut expected = Vec::with_capacity(cases.len());
        for (input, target) in cases {
            if input.len() != topology.input_width() {
                return Err(NetworkError::Shape {
                    expected: topology.input_width(),
                    found: input.len(),
                });
            }
            if target.len() != topology.output_width() {
                return Err(NetworkError::Shape {
                    expected: topology.output_width(),
                    found: target.len(),
                });
            }
            inputs.push(input);
            expected.push(target);
        }
        Ok(Dataset { inputs, expected })
    }

    /// Parses a case file: one case per line, `w[0]` inputs followed by
    /// `w[L]` expected outputs, whitespace-separated.
    ///
    /// Blank lines are ignored; the number of remaining lines must equal
    /// `case_count`.
    pub fn from_reader<R: BufRead>(reader: R, topology: &Topology, case_count: usize) -> Result<Dataset> {
        let n_in = topology.input_width();
        let n_out = topology.output_width();
        let mut inputs = Vec::with_capacity(case_count);
        let mut expected = Vec::with_capacity(case_count);

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            if inputs.len() == case_count {
                return Err(NetworkError::Dataset {
                    line: line_no,
                    reason: format!("more than the configured {case_count} cases"),
                });
            }

            let values = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| NetworkError::Dataset {
                        line: line_no,
                        reason: format!("'{token}' is not a number"),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            if values.len() != n_in + n_out {
                return Err(NetworkError::Dataset {
                    line: line_no,
                    reason: format!(
                        "expected {} values ({n_in} inputs, {n_out} outputs), found {}",
                        n_in + n_out,
                        values.len()
                    ),
                });
            }

            inputs.push(values[..n_in].to_vec());
            expected.push(values[n_in..].to_vec());
        }

        if inputs.len() != case_count {
            return Err(NetworkError::Dataset {
                line: inputs.len() + 1,
                reason: format!("expected {case_count} cases, found {}", inputs.len()),
            });
        }
        Ok(Dataset { inputs, expected })
    }

    pub fn load_file<P: AsRef<Path>>(path: P, topology: &Topology, case_count: usize) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| NetworkError::from(e).in_file(path))?;
        let dataset = Dataset::from_reader(BufReader::new(file), topology, case_count)
            .map_err(|e| e.in_file(path))?;
        debug!("loaded {} cases from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    pub fn expected(&self) -> &[Vec<f64>] {
        &self.expected
    }

    /// `(input, expected)` for case `index`.
    pub fn case(&self, index: usize) -> (&[f64], &[f64]) {
        (self.inputs[index].as_slice(), self.expected[index].as_slice())
    }

    pub fn cases(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.inputs
            .iter()
            .zip(self.expected.iter())
            .map(|(i, e)| (i.as_slice(), e.as_slice()))
    }
}
