use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::elgamal::Ciphertext;
use crate::error::Error;

/// An ordered sequence of ciphertexts plus the index map recording, for
/// every slot, which pre-shuffle position its card came from.
///
/// Two of these exist during mental poker, one per encryption layer, and
/// slot `i` of both must always refer to the same physical card. The index
/// maps are what [`ensure_synced`] compares to detect a deck that was
/// permuted without its pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedDeck {
    cards: Vec<Ciphertext>,
    order: Vec<usize>,
}

impl EncryptedDeck {
    pub fn new(cards: Vec<Ciphertext>) -> Self {
        let order = (0..cards.len()).collect();
        EncryptedDeck { cards, order }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Ciphertext] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Result<&Ciphertext, Error> {
        self.cards.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.cards.len(),
        })
    }

    /// Pre-shuffle position of the card currently at `index`.
    pub fn source_index(&self, index: usize) -> Result<usize, Error> {
        self.order.get(index).copied().ok_or(Error::IndexOutOfBounds {
            index,
            len: self.order.len(),
        })
    }

    /// Reorders the deck so slot `i` receives the card previously at
    /// `perm[i]`. Rejects anything that is not a permutation of `0..len`
    /// before touching the deck.
    pub fn apply_permutation(&mut self, perm: &[usize]) -> Result<(), Error> {
        validate_permutation(perm, self.cards.len())?;
        self.cards = perm.iter().map(|&i| self.cards[i]).collect();
        self.order = perm.iter().map(|&i| self.order[i]).collect();
        Ok(())
    }
}

fn validate_permutation(perm: &[usize], len: usize) -> Result<(), Error> {
    if perm.len() != len {
        return Err(Error::Desync(format!(
            "permutation length {} does not match deck length {len}",
            perm.len()
        )));
    }
    let mut seen = vec![false; len];
    for &i in perm {
        if i >= len {
            return Err(Error::IndexOutOfBounds { index: i, len });
        }
        if seen[i] {
            return Err(Error::Desync(format!("index {i} repeated in permutation")));
        }
        seen[i] = true;
    }
    Ok(())
}

/// Uniform permutation of `0..len` (Fisher-Yates under the hood).
pub fn random_permutation<R: Rng>(rng: &mut R, len: usize) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..len).collect();
    perm.shuffle(rng);
    perm
}

/// Draws one permutation and applies it to both decks, preserving their
/// slot alignment.
pub fn shuffle_in_lockstep<R: Rng>(
    rng: &mut R,
    a: &mut EncryptedDeck,
    b: &mut EncryptedDeck,
) -> Result<(), Error> {
    if a.len() != b.len() {
        return Err(Error::Desync(format!(
            "deck lengths differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    let perm = random_permutation(rng, a.len());
    a.apply_permutation(&perm)?;
    b.apply_permutation(&perm)?;
    Ok(())
}

/// Checks that both decks agree on length and on which original index each
/// slot holds. A mismatch means one deck was permuted without the other,
/// and any reveal against the pair would produce a wrong card.
pub fn ensure_synced(a: &EncryptedDeck, b: &EncryptedDeck) -> Result<(), Error> {
    if a.len() != b.len() {
        return Err(Error::Desync(format!(
            "deck lengths differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    if a.order != b.order {
        return Err(Error::Desync("index maps disagree".into()));
    }
    Ok(())
}
