//! Space compliance test helpers.
//!
//! These functions verify that a space shape satisfies the invariants
//! shared by every variant of [`Space`]. Reused across all backend test
//! modules (Flag, Discrete, BoxSpace, MultiBinary, MultiDiscrete,
//! TextSpace, TupleSpace, DictSpace, SequenceSpace, GraphSpace).

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::space::Space;

/// Assert that every sampled value is a member of the space it came from.
pub fn assert_samples_are_members(space: &Space, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for i in 0..64 {
        let value = space.sample(&mut rng);
        assert!(
            space.contains(&value),
            "draw {i} from seed {seed} escaped {space}: {value:?}"
        );
    }
}

/// Assert that identically seeded rngs draw identical values.
pub fn assert_sampling_deterministic(space: &Space, seed: u64) {
    let mut a = ChaCha8Rng::seed_from_u64(seed);
    let mut b = ChaCha8Rng::seed_from_u64(seed);
    for i in 0..8 {
        let va = space.sample(&mut a);
        let vb = space.sample(&mut b);
        assert_eq!(va, vb, "draw {i} from seed {seed} diverged for {space}");
    }
}

/// Assert that the space renders a non-empty description.
pub fn assert_display_nonempty(space: &Space) {
    assert!(
        !space.to_string().is_empty(),
        "space {space:?} displays as the empty string"
    );
}

/// Run all 3 compliance checks on a space.
pub fn run_full_compliance(space: &Space, seed: u64) {
    assert_samples_are_members(space, seed);
    assert_sampling_deterministic(space, seed);
    assert_display_nonempty(space);
}
