//! Integer ElGamal over toy-sized primes, plus the two-party mental poker
//! protocol built on its multiplicative homomorphism.
//!
//! Demonstration-grade cryptography only: the demo moduli are ~30 bits and
//! every parameter is deliberately breakable. Nothing in this crate is fit
//! for protecting real data.

pub mod arith;
pub mod domain;
pub mod elgamal;
pub mod error;
pub mod poker;
pub mod shuffle;

pub use domain::{Domain, DEMO_DOMAIN, DEMO_DOMAIN_ALT};
pub use elgamal::{Ciphertext, KeyPair};
pub use error::Error;
pub use poker::{Card, PokerSession, Seat};
pub use shuffle::EncryptedDeck;
