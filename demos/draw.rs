//! Raffle draw: unique winners vs with-replacement draws from one pool.
//!
//! Both use the same uniform index selection; the unique draw flips to the
//! shuffle-based algorithm once the request is dense enough relative to the
//! pool.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tombola::{Collection, CollectionError};

fn main() -> Result<(), CollectionError> {
    let pool: Collection<u32, String> = (0..24u32)
        .map(|i| (1000 + i, format!("ticket-{i:02}")))
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let winners = pool.random_values_with_rng(5, true, &mut rng)?;
    println!("5 unique winners:      {winners:?}");

    let door_prizes = pool.random_keys_with_rng(5, false, &mut rng)?;
    println!("5 door-prize tickets (repeats allowed): {door_prizes:?}");

    let (number, name) = pool.random_entry_with_rng(&mut rng)?;
    println!("grand prize: #{number} -> {name}");

    // Dense enough to use the shuffle: 22 of 24.
    let mut everyone_once = pool.random_keys_with_rng(22, true, &mut rng)?;
    everyone_once.sort_unstable();
    println!("22 distinct tickets:   {everyone_once:?}");

    Ok(())
}
