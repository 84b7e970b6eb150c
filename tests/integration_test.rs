use mental_poker::elgamal::{encrypt_with_randomness, KeyPair};
use mental_poker::shuffle::EncryptedDeck;
use mental_poker::{Error, PokerSession, Seat, DEMO_DOMAIN, DEMO_DOMAIN_ALT};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The walkthrough deck: sixteen card values in Bob's starting order.
const REFERENCE_DECK: [u64; 16] = [13, 17, 4, 6, 14, 2, 12, 15, 5, 3, 7, 10, 8, 11, 16, 9];

/// A fixed, non-identity permutation so the expected slot contents are
/// known ahead of time.
const FIXED_PERM: [usize; 16] = [5, 0, 12, 9, 1, 15, 3, 8, 14, 2, 11, 7, 13, 4, 6, 10];

/// Rebuilds the reference session exactly as the walkthrough does: Bob
/// encrypts every card with the constant exponent 7, Alice encrypts each
/// of Bob's c2 values with exponents 2..=17.
fn reference_session() -> PokerSession {
    let bob = KeyPair::from_secret(15, &DEMO_DOMAIN).unwrap();
    let alice = KeyPair::from_secret(20, &DEMO_DOMAIN).unwrap();

    let inner: Vec<_> = REFERENCE_DECK
        .iter()
        .map(|&card| encrypt_with_randomness(card, bob.pk, 7, &DEMO_DOMAIN).unwrap())
        .collect();
    let outer: Vec<_> = inner
        .iter()
        .enumerate()
        .map(|(i, ct)| {
            encrypt_with_randomness(ct.c2, alice.pk, i as u64 + 2, &DEMO_DOMAIN).unwrap()
        })
        .collect();

    PokerSession::resume(
        DEMO_DOMAIN,
        bob,
        alice,
        EncryptedDeck::new(inner),
        EncryptedDeck::new(outer),
    )
    .unwrap()
}

#[test]
fn test_reference_scenario_before_shuffle() {
    let session = reference_session();

    // 1. Bob draws card 3 straight off the unshuffled deck.
    let partial = session.peer_unwrap(Seat::Bob, 3).unwrap();
    let card = session.finish_reveal(Seat::Bob, 3, partial).unwrap();
    assert_eq!(card, 6, "slot 3 of the unshuffled deck holds 6");

    // 2. Alice draws card 7 through the symmetric path.
    let partial = session.peer_unwrap(Seat::Alice, 7).unwrap();
    let card = session.finish_reveal(Seat::Alice, 7, partial).unwrap();
    assert_eq!(card, 15, "slot 7 of the unshuffled deck holds 15");
}

#[test]
fn test_reference_scenario_with_fixed_permutation() {
    let mut session = reference_session();
    session.apply_permutation(&FIXED_PERM).unwrap();

    // Every slot must reveal the card that was originally at its source
    // index, on both reveal paths.
    for slot in 0..REFERENCE_DECK.len() {
        let origin = session.decks().0.source_index(slot).unwrap();
        assert_eq!(origin, FIXED_PERM[slot]);
        assert_eq!(
            session.reveal(Seat::Bob, slot).unwrap(),
            REFERENCE_DECK[origin],
            "Bob's reveal of slot {slot} must track origin {origin}"
        );
        assert_eq!(
            session.reveal(Seat::Alice, slot).unwrap(),
            REFERENCE_DECK[origin],
            "Alice's reveal of slot {slot} must track origin {origin}"
        );
    }

    // The originally-tracked card 3 is still worth 6 wherever it landed.
    let landed = (0..session.len())
        .find(|&slot| session.decks().0.source_index(slot).unwrap() == 3)
        .unwrap();
    assert_eq!(session.reveal(Seat::Bob, landed).unwrap(), 6);
}

#[test]
fn test_full_protocol_with_seeded_rng() {
    // 1. Setup with a fixed seed for reproducibility.
    let mut rng = ChaCha8Rng::seed_from_u64(1337);
    let bob = KeyPair::generate(&mut rng, &DEMO_DOMAIN).unwrap();
    let alice = KeyPair::generate(&mut rng, &DEMO_DOMAIN).unwrap();

    // 2. Deal and shuffle a few times.
    let mut session =
        PokerSession::deal(&mut rng, DEMO_DOMAIN, &REFERENCE_DECK, bob, alice).unwrap();
    for _ in 0..3 {
        session.shuffle(&mut rng).unwrap();
    }

    // 3. Revealing every slot recovers the whole deck, just reordered.
    let mut revealed: Vec<u64> = (0..session.len())
        .map(|slot| session.reveal(Seat::Bob, slot).unwrap())
        .collect();
    revealed.sort_unstable();
    let mut expected = REFERENCE_DECK.to_vec();
    expected.sort_unstable();
    assert_eq!(revealed, expected, "shuffling must not lose or invent cards");

    // 4. Both paths agree slot by slot.
    for slot in 0..session.len() {
        assert_eq!(
            session.reveal(Seat::Bob, slot).unwrap(),
            session.reveal(Seat::Alice, slot).unwrap()
        );
    }
}

#[test]
fn test_reveal_idempotent_after_shuffle() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let bob = KeyPair::from_secret(15, &DEMO_DOMAIN).unwrap();
    let alice = KeyPair::from_secret(20, &DEMO_DOMAIN).unwrap();
    let mut session =
        PokerSession::deal(&mut rng, DEMO_DOMAIN, &REFERENCE_DECK, bob, alice).unwrap();
    session.shuffle(&mut rng).unwrap();

    let first = session.reveal(Seat::Bob, 3).unwrap();
    let second = session.reveal(Seat::Bob, 3).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_desynchronized_decks_are_rejected() {
    let session = reference_session();
    let (inner, outer) = session.decks();
    let bob = KeyPair::from_secret(15, &DEMO_DOMAIN).unwrap();
    let alice = KeyPair::from_secret(20, &DEMO_DOMAIN).unwrap();

    // Permuting one deck but not its pair must surface as a desync, not as
    // a plausible-looking wrong card.
    let mut skewed = outer.clone();
    skewed.apply_permutation(&FIXED_PERM).unwrap();
    let err = PokerSession::resume(DEMO_DOMAIN, bob, alice, inner.clone(), skewed);
    assert!(matches!(err, Err(Error::Desync(_))));

    // Mismatched permutations on the two decks are just as broken.
    let mut skewed_inner = inner.clone();
    let mut skewed_outer = outer.clone();
    skewed_inner.apply_permutation(&FIXED_PERM).unwrap();
    let mut other_perm = FIXED_PERM;
    other_perm.swap(0, 1);
    skewed_outer.apply_permutation(&other_perm).unwrap();
    let err = PokerSession::resume(DEMO_DOMAIN, bob, alice, skewed_inner, skewed_outer);
    assert!(matches!(err, Err(Error::Desync(_))));
}

#[test]
fn test_protocol_on_alternate_domain() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let bob = KeyPair::generate(&mut rng, &DEMO_DOMAIN_ALT).unwrap();
    let alice = KeyPair::generate(&mut rng, &DEMO_DOMAIN_ALT).unwrap();
    let cards = [13, 17, 4, 6, 14, 2];

    let mut session = PokerSession::deal(&mut rng, DEMO_DOMAIN_ALT, &cards, bob, alice).unwrap();
    session.shuffle(&mut rng).unwrap();

    for slot in 0..cards.len() {
        let origin = session.decks().0.source_index(slot).unwrap();
        assert_eq!(session.reveal(Seat::Alice, slot).unwrap(), cards[origin]);
    }
}
