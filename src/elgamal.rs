use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arith::{mod_inverse, mod_pow, random_in_range};
use crate::domain::Domain;
use crate::error::Error;

/// An ElGamal ciphertext pair `(g^k mod p, y^k * m mod p)`. Immutable:
/// every encryption produces a fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    pub c1: u64,
    pub c2: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyPair {
    pub sk: u64,
    pub pk: u64,
}

impl KeyPair {
    /// Derives the public half `g^sk mod p` for a caller-chosen secret.
    pub fn from_secret(sk: u64, domain: &Domain) -> Result<Self, Error> {
        let pk = mod_pow(domain.g, sk, domain.p)?;
        Ok(KeyPair { sk, pk })
    }

    pub fn generate<R: Rng>(rng: &mut R, domain: &Domain) -> Result<Self, Error> {
        let sk = random_in_range(rng, 2, domain.p - 1);
        Self::from_secret(sk, domain)
    }
}

/// Encrypts `message` under `public_key`, drawing the ephemeral exponent
/// from `rng`. Consumes exactly one draw per call.
pub fn encrypt<R: Rng>(
    rng: &mut R,
    message: u64,
    public_key: u64,
    domain: &Domain,
) -> Result<Ciphertext, Error> {
    let k = random_in_range(rng, 2, domain.p - 1);
    encrypt_with_randomness(message, public_key, k, domain)
}

/// Encryption with a caller-supplied ephemeral exponent `k`.
///
/// The mental poker protocol needs this variant: each party commits to one
/// `k` per card when its layer is applied, and the layer must stay exactly
/// reproducible for the reveal rounds rather than being re-drawn.
pub fn encrypt_with_randomness(
    message: u64,
    public_key: u64,
    k: u64,
    domain: &Domain,
) -> Result<Ciphertext, Error> {
    if message >= domain.p {
        return Err(Error::MessageOutOfRange {
            message,
            modulus: domain.p,
        });
    }
    let c1 = mod_pow(domain.g, k, domain.p)?;
    let shared = mod_pow(public_key, k, domain.p)?;
    let c2 = (shared as u128 * message as u128 % domain.p as u128) as u64;
    Ok(Ciphertext { c1, c2 })
}

/// Recovers the message as `(c1^sk)^-1 * c2 mod p`.
///
/// Correct only for a ciphertext produced under the matching public key
/// and domain. Nothing authenticates the pair: ElGamal is malleable by
/// construction, and a tampered ciphertext decrypts to garbage, not to an
/// error.
pub fn decrypt(ciphertext: &Ciphertext, private_key: u64, domain: &Domain) -> Result<u64, Error> {
    decrypt_parts(ciphertext.c1, ciphertext.c2, private_key, domain)
}

/// Decryption on loose `c1`/`c2` parts.
///
/// The reveal protocol decrypts values that never exist as a `Ciphertext`:
/// the second operand is a peer's partial-decryption output paired with a
/// `c1` from the other encryption layer.
pub fn decrypt_parts(c1: u64, c2: u64, private_key: u64, domain: &Domain) -> Result<u64, Error> {
    let s = mod_pow(c1, private_key, domain.p)?;
    let s_inv = mod_inverse(s, domain.p)?;
    Ok((s_inv as u128 * c2 as u128 % domain.p as u128) as u64)
}
