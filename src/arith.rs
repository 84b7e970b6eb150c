use rand::Rng;

use crate::error::Error;

/// Modular exponentiation `base^exponent mod modulus` by iterative
/// square-and-multiply.
///
/// Intermediate products are accumulated in `u128`, so the squaring step
/// cannot overflow for any modulus that fits in `u64`. That full `u64`
/// range is the supported contract; larger moduli would need a big-integer
/// backend.
pub fn mod_pow(base: u64, exponent: u64, modulus: u64) -> Result<u64, Error> {
    if modulus == 0 {
        return Err(Error::InvalidModulus("modulus must be positive".into()));
    }
    let m = modulus as u128;
    let mut result = 1 % m;
    let mut acc = base as u128 % m;
    let mut exp = exponent;
    while exp > 0 {
        if exp % 2 != 0 {
            result = result * acc % m;
        }
        acc = acc * acc % m;
        exp /= 2;
    }
    Ok(result as u64)
}

/// Multiplicative inverse of `value` modulo `modulus` via the extended
/// Euclidean algorithm.
///
/// Defined only when `gcd(value, modulus) == 1`; anything else is an
/// `InvalidModulus` error, since it means the caller's parameters were
/// never valid (a prime modulus guarantees coprimality for every value it
/// does not divide). The Bézout coefficient is tracked in `i128` and
/// normalized into `[0, modulus)` before returning.
pub fn mod_inverse(value: u64, modulus: u64) -> Result<u64, Error> {
    if modulus == 0 {
        return Err(Error::InvalidModulus("modulus must be positive".into()));
    }
    let (mut r0, mut r1) = (modulus as i128, (value % modulus) as i128);
    let (mut t0, mut t1) = (0i128, 1i128);
    while r1 != 0 {
        let q = r0 / r1;
        (r0, r1) = (r1, r0 - q * r1);
        (t0, t1) = (t1, t0 - q * t1);
    }
    if r0 != 1 {
        return Err(Error::InvalidModulus(format!(
            "{value} has no inverse modulo {modulus} (gcd {r0})"
        )));
    }
    let m = modulus as i128;
    Ok(((t0 % m + m) % m) as u64)
}

/// Uniform draw in `[low, high)`.
///
/// The draw is only as strong as the `rng` the caller supplies; nothing
/// here upgrades a non-cryptographic generator. Pass a CSPRNG where the
/// ephemeral exponents need to stay unpredictable.
pub fn random_in_range<R: Rng>(rng: &mut R, low: u64, high: u64) -> u64 {
    rng.gen_range(low..high)
}
