// Random ballots and profiles drawn from the impartial culture: every ballot is
// an independent, uniformly random permutation of the alternatives.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::*;

pub fn generate_ballot<R: Rng>(num_alternatives: usize, rng: &mut R) -> Ballot {
    let mut alternatives: Vec<Alternative> =
        (0..num_alternatives as u32).map(Alternative).collect();
    alternatives.shuffle(rng);
    Ballot(alternatives)
}

pub fn generate_profile<R: Rng>(
    num_alternatives: usize,
    num_voters: usize,
    rng: &mut R,
) -> Result<Profile, ManipulabilityErrors> {
    let ballots = (0..num_voters)
        .map(|_| generate_ballot(num_alternatives, rng))
        .collect();
    Profile::new(num_alternatives, ballots)
}
