use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid modulus: {0}")]
    InvalidModulus(String),
    #[error("message {message} out of range for modulus {modulus}")]
    MessageOutOfRange { message: u64, modulus: u64 },
    #[error("deck desynchronized: {0}")]
    Desync(String),
    #[error("index {index} out of bounds for deck of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
