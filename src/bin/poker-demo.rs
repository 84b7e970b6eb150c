use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use mental_poker::elgamal::{self, KeyPair};
use mental_poker::{Domain, Error, PokerSession, Seat, DEMO_DOMAIN};

/// The original 16-card ordering the protocol walkthrough starts from.
const REFERENCE_DECK: [u64; 16] = [13, 17, 4, 6, 14, 2, 12, 15, 5, 3, 7, 10, 8, 11, 16, 9];

#[derive(Parser)]
#[command(
    name = "poker-demo",
    about = "Two-party mental poker over toy integer ElGamal"
)]
struct Cli {
    /// Prime modulus p
    #[arg(long, default_value_t = DEMO_DOMAIN.p)]
    prime: u64,

    /// Generator g of the multiplicative group mod p
    #[arg(long, default_value_t = DEMO_DOMAIN.g)]
    generator: u64,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deal and shuffle the reference deck, then let each party draw a card
    Deal {
        /// Bob's private key
        #[arg(long, default_value = "15")]
        bob_key: u64,

        /// Alice's private key
        #[arg(long, default_value = "20")]
        alice_key: u64,

        /// Post-shuffle slot Bob draws
        #[arg(long, default_value = "3")]
        bob_draw: usize,

        /// Post-shuffle slot Alice draws
        #[arg(long, default_value = "7")]
        alice_draw: usize,
    },
    /// Encrypt one message and decrypt it again, printing the round trip
    Cipher {
        /// Private key x; the public key is derived as g^x mod p
        #[arg(long)]
        private_key: u64,

        /// Message to encrypt (must be below the prime)
        #[arg(long)]
        message: u64,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let domain = match Domain::new(cli.prime, cli.generator) {
        Ok(domain) => domain,
        Err(e) => {
            eprintln!("Invalid domain parameters: {e}");
            std::process::exit(1);
        }
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = match cli.command {
        Command::Deal {
            bob_key,
            alice_key,
            bob_draw,
            alice_draw,
        } => run_deal(&mut rng, domain, bob_key, alice_key, bob_draw, alice_draw),
        Command::Cipher {
            private_key,
            message,
        } => run_cipher(&mut rng, domain, private_key, message),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_deal(
    rng: &mut StdRng,
    domain: Domain,
    bob_key: u64,
    alice_key: u64,
    bob_draw: usize,
    alice_draw: usize,
) -> Result<(), Error> {
    let bob = KeyPair::from_secret(bob_key, &domain)?;
    let alice = KeyPair::from_secret(alice_key, &domain)?;

    eprintln!("Domain:  p = {}, g = {}", domain.p, domain.g);
    eprintln!("Bob:     x = {}, y = {}", bob.sk, bob.pk);
    eprintln!("Alice:   x = {}, y = {}", alice.sk, alice.pk);
    eprintln!("Deck:    {REFERENCE_DECK:?}");

    let mut session = PokerSession::deal(rng, domain, &REFERENCE_DECK, bob, alice)?;
    session.shuffle(rng)?;
    eprintln!("Deck double-encrypted and shuffled");

    let partial = session.peer_unwrap(Seat::Bob, bob_draw)?;
    println!("Bob draws slot {bob_draw}; Alice's partial decryption: {partial}");
    let card = session.finish_reveal(Seat::Bob, bob_draw, partial)?;
    println!("Bob's card: {card}");

    let partial = session.peer_unwrap(Seat::Alice, alice_draw)?;
    println!("Alice draws slot {alice_draw}; Bob's partial decryption: {partial}");
    let card = session.finish_reveal(Seat::Alice, alice_draw, partial)?;
    println!("Alice's card: {card}");

    Ok(())
}

fn run_cipher(rng: &mut StdRng, domain: Domain, private_key: u64, message: u64) -> Result<(), Error> {
    let keys = KeyPair::from_secret(private_key, &domain)?;
    println!("Public key:  y = {}", keys.pk);

    let ciphertext = elgamal::encrypt(rng, message, keys.pk, &domain)?;
    println!("Ciphertext:  c1 = {}, c2 = {}", ciphertext.c1, ciphertext.c2);

    let recovered = elgamal::decrypt(&ciphertext, keys.sk, &domain)?;
    println!("Decrypted:   {recovered}");

    Ok(())
}
