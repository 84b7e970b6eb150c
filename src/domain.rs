use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Shared group parameters: a prime modulus `p` and a generator `g` of its
/// multiplicative group. Fixed per deployment and common to both parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub p: u64,
    pub g: u64,
}

/// Default demo parameters, a ~30-bit prime. Deliberately toy-sized and
/// trivially breakable; only the protocol mechanics are the point.
pub const DEMO_DOMAIN: Domain = Domain { p: 892_086_827, g: 2 };

/// Alternate ~30-bit demo pair.
pub const DEMO_DOMAIN_ALT: Domain = Domain { p: 750_443_147, g: 2 };

impl Domain {
    /// Structural validation only: `p >= 5` (ephemeral exponents are drawn
    /// from `[2, p - 1)`, which must be non-empty) and `1 < g < p`.
    /// Primality of `p` and the order of `g` remain the caller's contract;
    /// the preset constants above are known-good pairs.
    pub fn new(p: u64, g: u64) -> Result<Self, Error> {
        if p < 5 {
            return Err(Error::InvalidModulus(format!("modulus {p} too small")));
        }
        if g <= 1 || g >= p {
            return Err(Error::InvalidModulus(format!(
                "generator {g} outside (1, {p})"
            )));
        }
        Ok(Domain { p, g })
    }
}
