use rand::RngCore;

/// a uniformly random value in `0..bound`, via rejection sampling under a bit mask
pub fn next_below(bound: usize, mut rng: impl RngCore) -> usize {
    assert!(bound > 0, "empty sample range");
    if bound == 1 {
        return 0;
    }
    let mask = (1usize << ((bound - 1).ilog2() + 1)) - 1;
    loop {
        let pick = rng.next_u64() as usize & mask;
        if pick < bound {
            return pick;
        }
    }
}

#[cfg(test)]
pub fn seeded_rng() -> ([u8; 32], rand::rngs::StdRng) {
    let mut seed = [0; 32];
    rand::rngs::OsRng
        .try_fill_bytes(&mut seed)
        .expect("failed to generate seed");
    let rng = <rand::rngs::StdRng as rand::SeedableRng>::from_seed(seed);
    (seed, rng)
}
