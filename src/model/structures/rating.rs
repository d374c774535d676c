use serde::{Deserialize, Serialize};

/// Gaussian skill belief: mean `mu` and uncertainty `sigma`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub sigma: f64
}

impl Rating {
    pub fn new(mu: f64, sigma: f64) -> Rating {
        Rating { mu, sigma }
    }
}
