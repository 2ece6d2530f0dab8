use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use rand::Rng;

use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;

/// The weight tensor of a network: one [`Matrix`] per connection layer.
///
/// `layers[n].get(k, j)` is the weight from unit `k` of layer `n` to unit
/// `j` of layer `n + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightStore {
    topology: Topology,
    layers: Vec<Matrix>,
}

impl WeightStore {
    /// All-zero weights shaped by `topology`.
    pub fn zeros(topology: &Topology) -> WeightStore {
        let layers = topology
            .widths()
            .windows(2)
            .map(|pair| Matrix::zeros(pair[0], pair[1]))
            .collect();
        WeightStore {
            topology: topology.clone(),
            layers,
        }
    }

    /// Wraps pre-built blocks, checking each against the topology.
    pub fn from_layers(topology: &Topology, layers: Vec<Matrix>) -> Result<WeightStore> {
        if layers.len() != topology.layer_count() {
            return Err(NetworkError::Configuration(format!(
                "topology {topology} has {} connection layers, got {} weight blocks",
                topology.layer_count(),
                layers.len()
            )));
        }
        for (n, m) in layers.iter().enumerate() {
            let shape_ok = m.rows == topology.width(n)
                && m.cols == topology.width(n + 1)
                && m.data.len() == m.rows
                && m.data.iter().all(|row| row.len() == m.cols);
            if !shape_ok {
                return Err(NetworkError::Configuration(format!(
                    "weight block {n} should be {}x{}",
                    topology.width(n),
                    topology.width(n + 1)
                )));
            }
        }
        Ok(WeightStore {
            topology: topology.clone(),
            layers,
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn layer(&self, n: usize) -> &Matrix {
        &self.layers[n]
    }

    pub fn layer_mut(&mut self, n: usize) -> &mut Matrix {
        &mut self.layers[n]
    }

    pub fn get(&self, n: usize, k: usize, j: usize) -> f64 {
        self.layers[n].get(k, j)
    }

    pub fn add(&mut self, n: usize, k: usize, j: usize, delta: f64) {
        self.layers[n].add_to(k, j, delta);
    }

    /// Every weight in canonical order: layer, then source, then destination.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.layers.iter().flat_map(|m| m.values())
    }

    /// Fills every weight independently and uniformly from `[min, max)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, min: f64, max: f64, rng: &mut R) -> Result<()> {
        if !min.is_finite() || !max.is_finite() {
            return Err(NetworkError::Configuration(format!(
                "weight range [{min}, {max}) is not finite"
            )));
        }
        if min > max {
            return Err(NetworkError::Configuration(format!(
                "weight range [{min}, {max}) is empty"
            )));
        }
        for m in &mut self.layers {
            m.fill_uniform(min, max, rng);
        }
        Ok(())
    }

    /// Replaces every weight with the values in `source`.
    ///
    /// The first line must be this topology's fingerprint, byte for byte.
    /// The rest holds exactly `Σ w[n] * w[n+1]` numbers, normally one per
    /// line. On error the current weights are left untouched.
    pub fn load_from<R: BufRead>(&mut self, source: R) -> Result<()> {
        let mut lines = source.lines();
        let expected = self.topology.fingerprint();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(NetworkError::MalformedWeights {
                    line: 1,
                    reason: "missing topology line".into(),
                })
            }
        };
        let found = header.strip_suffix('\r').unwrap_or(header.as_str());
        if found != expected {
            return Err(NetworkError::TopologyMismatch {
                expected,
                found: found.to_string(),
            });
        }

        let wanted = self.topology.weight_count();
        let mut values = Vec::with_capacity(wanted);
        let mut last_line = 1;
        for (idx, line) in lines.enumerate() {
            let line = line?;
            let line_no = idx + 2;
            last_line = line_no;
            for token in line.split_whitespace() {
                let value: f64 = token.parse().map_err(|_| NetworkError::MalformedWeights {
                    line: line_no,
                    reason: format!("'{token}' is not a number"),
                })?;
                if values.len() == wanted {
                    return Err(NetworkError::MalformedWeights {
                        line: line_no,
                        reason: format!("more than {wanted} weights for topology {expected}"),
                    });
                }
                values.push(value);
            }
        }
        if values.len() != wanted {
            return Err(NetworkError::MalformedWeights {
                line: last_line,
                reason: format!(
                    "expected {wanted} weights for topology {expected}, found {}",
                    values.len()
                ),
            });
        }

        let mut it = values.into_iter();
        for m in &mut self.layers {
            for row in &mut m.data {
                for w in row.iter_mut() {
                    // count checked above
                    if let Some(v) = it.next() {
                        *w = v;
                    }
                }
            }
        }
        Ok(())
    }

    /// Writes the fingerprint line followed by one weight per line.
    ///
    /// Values use the shortest decimal form that parses back to the same
    /// `f64`, so `load_from` restores the tensor exactly.
    pub fn save_to<W: Write>(&self, mut sink: W) -> Result<()> {
        writeln!(sink, "{}", self.topology.fingerprint())?;
        for w in self.values() {
            writeln!(sink, "{w}")?;
        }
        sink.flush()?;
        Ok(())
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| NetworkError::from(e).in_file(path))?;
        self.load_from(BufReader::new(file))
            .map_err(|e| e.in_file(path))?;
        debug!("loaded {} weights from {}", self.topology.weight_count(), path.display());
        Ok(())
    }

    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| NetworkError::from(e).in_file(path))?;
        self.save_to(BufWriter::new(file))
            .map_err(|e| e.in_file(path))?;
        debug!("saved {} weights to {}", self.topology.weight_count(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::io::Cursor;

    fn topo(widths: &[usize]) -> Topology {
        Topology::from_widths(widths).unwrap()
    }

    #[test]
    fn save_then_load_restores_exactly() {
        let t = topo(&[3, 4, 2, 1]);
        let mut original = WeightStore::zeros(&t);
        original.randomize(-1.5, 1.5, &mut StdRng::seed_from_u64(11)).unwrap();
        original.add(0, 0, 0, 1e-17);

        let mut buf = Vec::new();
        original.save_to(&mut buf).unwrap();

        let mut restored = WeightStore::zeros(&t);
        restored.load_from(Cursor::new(buf)).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn saved_file_layout() {
        let t = topo(&[2, 1]);
        let mut w = WeightStore::zeros(&t);
        w.add(0, 0, 0, 0.5);
        w.add(0, 1, 0, -2.0);

        let mut buf = Vec::new();
        w.save_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "2-1\n0.5\n-2\n");
    }

    #[test]
    fn fingerprint_mismatch_is_rejected() {
        let mut w = WeightStore::zeros(&topo(&[2, 2, 1]));
        let err = w.load_from(Cursor::new("2-3-1\n0\n0\n0\n0\n0\n0\n0\n0\n0\n")).unwrap_err();
        match err {
            NetworkError::TopologyMismatch { expected, found } => {
                assert_eq!(expected, "2-2-1");
                assert_eq!(found, "2-3-1");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn mismatch_wins_over_bad_numbers() {
        let mut w = WeightStore::zeros(&topo(&[2, 1]));
        let err = w.load_from(Cursor::new("2-2\nnot a number\n")).unwrap_err();
        assert!(matches!(err, NetworkError::TopologyMismatch { .. }));
    }

    #[test]
    fn wrong_count_is_malformed() {
        let mut w = WeightStore::zeros(&topo(&[2, 1]));
        let short = w.load_from(Cursor::new("2-1\n0.1\n")).unwrap_err();
        assert!(matches!(short, NetworkError::MalformedWeights { .. }));

        let long = w.load_from(Cursor::new("2-1\n0.1\n0.2\n0.3\n")).unwrap_err();
        assert!(matches!(long, NetworkError::MalformedWeights { line: 4, .. }));

        let junk = w.load_from(Cursor::new("2-1\n0.1\nabc\n")).unwrap_err();
        assert!(matches!(junk, NetworkError::MalformedWeights { line: 3, .. }));

        assert!(w.values().all(|v| v == 0.0));
    }

    #[test]
    fn accepts_crlf_and_blank_lines() {
        let mut w = WeightStore::zeros(&topo(&[2, 1]));
        w.load_from(Cursor::new("2-1\r\n0.25\r\n\r\n-0.75\r\n")).unwrap();
        assert_eq!(w.values().collect::<Vec<_>>(), vec![0.25, -0.75]);
    }

    #[test]
    fn randomize_rejects_inverted_range() {
        let mut w = WeightStore::zeros(&topo(&[2, 1]));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            w.randomize(1.0, -1.0, &mut rng),
            Err(NetworkError::Configuration(_))
        ));
        assert!(w.randomize(f64::NAN, 1.0, &mut rng).is_err());
    }

    #[test]
    fn from_layers_checks_shapes() {
        let t = topo(&[2, 3, 1]);
        let ok = WeightStore::from_layers(&t, vec![Matrix::zeros(2, 3), Matrix::zeros(3, 1)]);
        assert!(ok.is_ok());
        let bad = WeightStore::from_layers(&t, vec![Matrix::zeros(3, 2), Matrix::zeros(3, 1)]);
        assert!(matches!(bad, Err(NetworkError::Configuration(_))));
    }
}
