use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Validated layer widths `w[0..=L]` of a fully-connected network.
///
/// `w[0]` is the input width, `w[L]` the output width, and `L >= 1` is the
/// number of connection layers. The canonical string form `"w0-w1-...-wL"`
/// doubles as the fingerprint written at the top of every weight file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology {
    widths: Vec<usize>,
}

impl Topology {
    /// Builds a topology from an explicit connection-layer count and
    /// `layer_count + 1` widths.
    pub fn new(layer_count: usize, widths: Vec<usize>) -> Result<Topology> {
        if layer_count < 1 {
            return Err(NetworkError::Configuration(
                "a network needs at least one connection layer".into(),
            ));
        }
        if widths.len() != layer_count + 1 {
            return Err(NetworkError::Configuration(format!(
                "{layer_count} connection layers need {} widths, got {}",
                layer_count + 1,
                widths.len()
            )));
        }
        if let Some(n) = widths.iter().position(|&w| w == 0) {
            return Err(NetworkError::Configuration(format!(
                "layer {n} has no units"
            )));
        }
        Ok(Topology { widths })
    }

    /// Same as [`Topology::new`] with the layer count implied by the widths.
    pub fn from_widths(widths: &[usize]) -> Result<Topology> {
        Topology::new(widths.len().saturating_sub(1), widths.to_vec())
    }

    /// Number of connection layers `L`.
    pub fn layer_count(&self) -> usize {
        self.widths.len() - 1
    }

    /// Width of layer `n`, for `n` in `[0, L]`.
    pub fn width(&self, n: usize) -> usize {
        self.widths[n]
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn input_width(&self) -> usize {
        self.widths[0]
    }

    pub fn output_width(&self) -> usize {
        self.widths[self.layer_count()]
    }

    /// Total number of weights, `Σ w[n] * w[n+1]`.
    pub fn weight_count(&self) -> usize {
        self.widths.windows(2).map(|pair| pair[0] * pair[1]).sum()
    }

    pub fn fingerprint(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.widths.iter().map(|w| w.to_string()).collect();
        write!(f, "{}", parts.join("-"))
    }
}

impl FromStr for Topology {
    type Err = NetworkError;

    /// Parses the canonical `"w0-w1-...-wL"` form.
    fn from_str(s: &str) -> Result<Topology> {
        let widths = s
            .trim()
            .split('-')
            .map(|part| {
                part.parse::<usize>().map_err(|_| {
                    NetworkError::Configuration(format!("'{part}' is not a layer width in '{s}'"))
                })
            })
            .collect::<Result<Vec<usize>>>()?;
        Topology::from_widths(&widths)
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = NetworkError;

    fn try_from(widths: Vec<usize>) -> Result<Topology> {
        Topology::from_widths(&widths)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(t: Topology) -> Vec<usize> {
        t.widths
    }
}
