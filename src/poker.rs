use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::elgamal::{self, Ciphertext, KeyPair};
use crate::error::Error;
use crate::shuffle::{ensure_synced, shuffle_in_lockstep, EncryptedDeck};

/// A card value. Any integer below the domain modulus works; the reference
/// deck uses small integers.
pub type Card = u64;

/// The two protocol roles. Bob lays down the inner encryption layer,
/// Alice the outer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    Alice,
    Bob,
}

impl Seat {
    pub fn peer(self) -> Seat {
        match self {
            Seat::Alice => Seat::Bob,
            Seat::Bob => Seat::Alice,
        }
    }
}

/// A two-party mental poker session: both encryption layers of one deck,
/// plus the key pairs that created them.
///
/// Slot alignment is the protocol's core invariant. Slot `i` of the inner
/// (Bob-keyed) deck and slot `i` of the outer (Alice-keyed) deck must
/// refer to the same physical card, so permutations are only ever applied
/// to both decks in lockstep, and alignment is re-checked before every
/// reveal.
///
/// Privacy holds between the parties, not against the process: running
/// both seats in one address space necessarily puts both private keys in
/// one place, and nothing cryptographic stops a caller from revealing a
/// slot the peer was never asked about. Honoring the draw protocol is
/// usage discipline, the same as with a physical deck both players can
/// reach.
pub struct PokerSession {
    domain: Domain,
    bob: KeyPair,
    alice: KeyPair,
    /// Inner layer: card values under Bob's key.
    bob_deck: EncryptedDeck,
    /// Outer layer: the inner deck's `c2` components under Alice's key.
    alice_deck: EncryptedDeck,
}

impl PokerSession {
    /// Double-encrypts `cards` into a fresh, unshuffled session.
    ///
    /// Bob encrypts every card under his key, then Alice encrypts each
    /// resulting `c2` under hers, slot for slot. Each layer commits to one
    /// ephemeral exponent per card, drawn here and never re-drawn, which
    /// keeps repeated reveals of a slot deterministic.
    pub fn deal<R: Rng>(
        rng: &mut R,
        domain: Domain,
        cards: &[Card],
        bob: KeyPair,
        alice: KeyPair,
    ) -> Result<Self, Error> {
        let inner = cards
            .iter()
            .map(|&card| elgamal::encrypt(rng, card, bob.pk, &domain))
            .collect::<Result<Vec<Ciphertext>, Error>>()?;
        let outer = inner
            .iter()
            .map(|ct| elgamal::encrypt(rng, ct.c2, alice.pk, &domain))
            .collect::<Result<Vec<Ciphertext>, Error>>()?;
        info!("dealt {} doubly encrypted cards", cards.len());
        Ok(PokerSession {
            domain,
            bob,
            alice,
            bob_deck: EncryptedDeck::new(inner),
            alice_deck: EncryptedDeck::new(outer),
        })
    }

    /// Rebuilds a session from decks produced elsewhere, e.g. the far side
    /// of a transport boundary. Refuses a pair whose slots no longer line
    /// up, which is the last point a desynchronization can be caught
    /// before a reveal would hand back a wrong card.
    pub fn resume(
        domain: Domain,
        bob: KeyPair,
        alice: KeyPair,
        bob_deck: EncryptedDeck,
        alice_deck: EncryptedDeck,
    ) -> Result<Self, Error> {
        ensure_synced(&bob_deck, &alice_deck)?;
        Ok(PokerSession {
            domain,
            bob,
            alice,
            bob_deck,
            alice_deck,
        })
    }

    /// One Fisher-Yates pass applied to both decks in lockstep.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) -> Result<(), Error> {
        shuffle_in_lockstep(rng, &mut self.bob_deck, &mut self.alice_deck)?;
        debug!("shuffled {} cards", self.bob_deck.len());
        Ok(())
    }

    /// Applies a caller-chosen permutation to both decks. The permutation
    /// is validated before either deck is touched.
    pub fn apply_permutation(&mut self, perm: &[usize]) -> Result<(), Error> {
        self.bob_deck.apply_permutation(perm)?;
        self.alice_deck.apply_permutation(perm)?;
        Ok(())
    }

    /// First reveal step for slot `index`, performed by the drawer's peer.
    ///
    /// When Bob draws, Alice fully strips her outer layer, handing back
    /// Bob's original `c2` for that slot; all she ever sees is ciphertext.
    /// When Alice draws, Bob strips his inner layer out from under hers,
    /// handing back a value still encrypted under Alice's key. Either way
    /// the peer learns nothing about the card.
    pub fn peer_unwrap(&self, drawer: Seat, index: usize) -> Result<u64, Error> {
        ensure_synced(&self.bob_deck, &self.alice_deck)?;
        let outer = self.alice_deck.card(index)?;
        let partial = match drawer {
            Seat::Bob => elgamal::decrypt(outer, self.alice.sk, &self.domain)?,
            Seat::Alice => {
                let inner = self.bob_deck.card(index)?;
                elgamal::decrypt_parts(inner.c1, outer.c2, self.bob.sk, &self.domain)?
            }
        };
        debug!("{:?} unwrapped slot {index} for {drawer:?}", drawer.peer());
        Ok(partial)
    }

    /// Second reveal step: the drawer removes the remaining layer with
    /// their own key. `partial` must be the peer's [`Self::peer_unwrap`]
    /// output for the same slot; swapping the order of the two steps
    /// decrypts the wrong layer and yields garbage.
    pub fn finish_reveal(&self, drawer: Seat, index: usize, partial: u64) -> Result<Card, Error> {
        ensure_synced(&self.bob_deck, &self.alice_deck)?;
        match drawer {
            Seat::Bob => {
                let inner = self.bob_deck.card(index)?;
                elgamal::decrypt_parts(inner.c1, partial, self.bob.sk, &self.domain)
            }
            Seat::Alice => {
                let outer = self.alice_deck.card(index)?;
                elgamal::decrypt_parts(outer.c1, partial, self.alice.sk, &self.domain)
            }
        }
    }

    /// Both reveal steps in order. Decryption is deterministic, so
    /// revealing the same slot twice yields the same card.
    pub fn reveal(&self, drawer: Seat, index: usize) -> Result<Card, Error> {
        let partial = self.peer_unwrap(drawer, index)?;
        let card = self.finish_reveal(drawer, index, partial)?;
        debug!("{drawer:?} revealed slot {index}");
        Ok(card)
    }

    pub fn len(&self) -> usize {
        self.bob_deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bob_deck.is_empty()
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Read-only view of the (inner, outer) decks.
    pub fn decks(&self) -> (&EncryptedDeck, &EncryptedDeck) {
        (&self.bob_deck, &self.alice_deck)
    }

    /// The two public keys as (Bob, Alice). Private keys never leave the
    /// session.
    pub fn public_keys(&self) -> (u64, u64) {
        (self.bob.pk, self.alice.pk)
    }
}
