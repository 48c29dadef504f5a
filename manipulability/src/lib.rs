mod config;
use log::debug;

pub mod builder;
pub mod experiment;
pub mod generator;
pub mod manual;
pub mod rules;

pub use crate::config::*;

/// The alternatives with the maximum score under the rule, in ascending order.
///
/// Fails if the profile does not contain any ballot.
pub fn winners(
    rule: ScoringRule,
    profile: &Profile,
) -> Result<Vec<Alternative>, ManipulabilityErrors> {
    if profile.is_empty() {
        return Err(ManipulabilityErrors::EmptyProfile);
    }
    let scores = rule.scores(profile);
    let top_score = scores.top_score().ok_or(ManipulabilityErrors::NoAlternatives)?;
    Ok(scores
        .iter()
        .filter(|(_, s)| *s == top_score)
        .map(|(a, _)| a)
        .collect())
}

/// Attempts to build a ballot that makes the favourite alternative a winner,
/// once added to the ballots of the other voters.
///
/// The ballot is built greedily, one position at a time, starting with the
/// favourite alternative at the top. For each free position, the remaining
/// alternatives are tried in ascending order. An alternative is accepted in this
/// position if, with the rest of the remaining alternatives appended in
/// ascending order, it does not get a strictly higher score than the favourite.
/// The alternatives following it in this tentative ballot are then also
/// accepted, as long as they do not beat the favourite either.
///
/// Returns `Ok(None)` if some position cannot be filled. This does not mean that
/// no manipulative ballot exists: the search does not explore all the orders.
///
/// Any ballot returned makes the favourite a winner of the completed profile.
pub fn search_manipulative_ballot(
    rule: ScoringRule,
    incomplete_profile: &Profile,
    favourite: Alternative,
) -> Result<Option<Ballot>, ManipulabilityErrors> {
    if !incomplete_profile.contains(favourite) {
        return Err(ManipulabilityErrors::UnknownAlternative(favourite));
    }

    let mut manipulative_ballot: Vec<Alternative> = vec![favourite];
    // Kept in ascending order.
    let mut others: Vec<Alternative> = incomplete_profile
        .alternatives()
        .filter(|a| *a != favourite)
        .collect();

    while !others.is_empty() {
        let mut placed = false;
        for (idx, considered) in others.iter().enumerate() {
            let rest: Vec<Alternative> = others
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, a)| *a)
                .collect();

            let mut tentative = manipulative_ballot.clone();
            tentative.push(*considered);
            tentative.extend(rest.iter().cloned());
            let completed = incomplete_profile.with_ballot_unchecked(Ballot(tentative));
            let scores = rule.scores(&completed);

            let fav_score = scores.get(favourite);
            if fav_score < scores.get(*considered) {
                continue;
            }

            // This position is safe for the considered alternative.
            manipulative_ballot.push(*considered);
            // The next positions may already be safe as well.
            let extra: Vec<Alternative> = rest
                .iter()
                .take_while(|r| fav_score >= scores.get(**r))
                .cloned()
                .collect();
            manipulative_ballot.extend(extra.iter().cloned());
            debug!(
                "search_manipulative_ballot: favourite: {} placed: {} extra: {:?} ballot: {:?}",
                favourite, considered, extra, manipulative_ballot
            );
            placed = true;
            break;
        }

        if !placed {
            debug!(
                "search_manipulative_ballot: favourite: {} cannot fill position {} of {:?}",
                favourite,
                manipulative_ballot.len() + 1,
                manipulative_ballot
            );
            return Ok(None);
        }
        others.retain(|a| !manipulative_ballot.contains(a));
    }

    Ok(Some(Ballot(manipulative_ballot)))
}

/// Looks for a voter who can get a preferred alternative elected by changing
/// their ballot.
///
/// The voters are checked in order. For each voter, the alternatives are
/// considered from the most preferred one. The scan of a ballot stops at the
/// first alternative that is already a winner: the voter is assumed to be
/// satisfied with it.
///
/// Returns the first manipulation found.
pub fn find_manipulation(
    rule: ScoringRule,
    profile: &Profile,
) -> Result<Option<Manipulation>, ManipulabilityErrors> {
    let truthful_winners = winners(rule, profile)?;
    debug!(
        "find_manipulation: checking profile with winners {:?}: {:?}",
        truthful_winners,
        profile.ballots()
    );

    for (voter, truthful_ballot) in profile.ballots().iter().enumerate() {
        for alternative in truthful_ballot.iter() {
            if truthful_winners.contains(alternative) {
                debug!(
                    "find_manipulation: alternative {} is a winner, voter {} with ballot {} cannot manipulate",
                    alternative, voter, truthful_ballot
                );
                break;
            }

            let incomplete_profile = profile.without_voter(voter);
            match search_manipulative_ballot(rule, &incomplete_profile, *alternative)? {
                Some(manipulative_ballot) => {
                    debug!(
                        "find_manipulation: voter {} can elect {} by changing {} to {}",
                        voter, alternative, truthful_ballot, manipulative_ballot
                    );
                    return Ok(Some(Manipulation {
                        voter,
                        truthful_ballot: truthful_ballot.clone(),
                        target: *alternative,
                        manipulative_ballot,
                    }));
                }
                None => {
                    debug!(
                        "find_manipulation: voter {} with ballot {} cannot manipulate to elect {}",
                        voter, truthful_ballot, alternative
                    );
                }
            }
        }
    }
    Ok(None)
}

/// True if some voter can manipulate the profile.
///
/// See [find_manipulation] for the procedure.
pub fn is_manipulable(rule: ScoringRule, profile: &Profile) -> Result<bool, ManipulabilityErrors> {
    Ok(find_manipulation(rule, profile)?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_profile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn profile(n: usize, ballots: &[&[u32]]) -> Profile {
        Profile::new(n, ballots.iter().map(|b| Ballot::from_indices(b)).collect()).unwrap()
    }

    fn alts(indices: &[u32]) -> Vec<Alternative> {
        indices.iter().map(|i| Alternative(*i)).collect()
    }

    fn random_profiles(seed: u64, count: usize) -> Vec<Profile> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut res = Vec::new();
        for i in 0..count {
            let n_alternatives = 1 + i % 5;
            let n_voters = 1 + (i / 5) % 6;
            res.push(generate_profile(n_alternatives, n_voters, &mut rng).unwrap());
        }
        res
    }

    #[test]
    fn winners_of_a_tie() {
        init();
        let p = profile(3, &[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]]);
        assert_eq!(winners(ScoringRule::Plurality, &p), Ok(alts(&[0, 1, 2])));
        assert_eq!(winners(ScoringRule::Borda, &p), Ok(alts(&[0, 1, 2])));
    }

    #[test]
    fn winners_single() {
        init();
        let p = profile(
            4,
            &[
                &[0, 1, 2, 3],
                &[0, 1, 2, 3],
                &[0, 1, 2, 3],
                &[1, 0, 2, 3],
                &[3, 2, 1, 0],
            ],
        );
        assert_eq!(winners(ScoringRule::Borda, &p), Ok(alts(&[0])));
    }

    #[test]
    fn winners_empty_profile() {
        let p = Profile::new(3, vec![]).unwrap();
        assert_eq!(
            winners(ScoringRule::Copeland, &p),
            Err(ManipulabilityErrors::EmptyProfile)
        );
    }

    #[test]
    fn winners_have_top_score() {
        init();
        for p in random_profiles(7, 60) {
            for rule in ScoringRule::ALL {
                let scores = rule.scores(&p);
                let top = scores.top_score().unwrap();
                let w = winners(rule, &p).unwrap();
                assert!(!w.is_empty());
                for a in p.alternatives() {
                    assert_eq!(w.contains(&a), scores.get(a) == top);
                }
            }
        }
    }

    #[test]
    fn search_behind_majority() {
        init();
        let p = profile(2, &[&[0, 1], &[0, 1]]);
        assert_eq!(
            search_manipulative_ballot(ScoringRule::Plurality, &p, Alternative(1)),
            Ok(None)
        );
    }

    #[test]
    fn search_finds_ballot() {
        init();
        let p = profile(3, &[&[1, 0, 2], &[2, 1, 0]]);
        assert_eq!(
            search_manipulative_ballot(ScoringRule::Borda, &p, Alternative(0)),
            Ok(Some(Ballot::from_indices(&[0, 2, 1])))
        );

        let p = profile(3, &[&[0, 1, 2], &[1, 2, 0]]);
        assert_eq!(
            search_manipulative_ballot(ScoringRule::Borda, &p, Alternative(2)),
            Ok(Some(Ballot::from_indices(&[2, 0, 1])))
        );

        let p = profile(4, &[&[1, 2, 3, 0], &[2, 3, 1, 0]]);
        assert_eq!(
            search_manipulative_ballot(ScoringRule::Borda, &p, Alternative(3)),
            Ok(Some(Ballot::from_indices(&[3, 0, 1, 2])))
        );
    }

    #[test]
    fn search_copeland_fails() {
        init();
        let p = profile(3, &[&[0, 1, 2], &[1, 0, 2]]);
        assert_eq!(
            search_manipulative_ballot(ScoringRule::Copeland, &p, Alternative(2)),
            Ok(None)
        );
    }

    #[test]
    fn search_without_other_voters() {
        init();
        let p = Profile::new(3, vec![]).unwrap();
        for rule in ScoringRule::ALL {
            let b = search_manipulative_ballot(rule, &p, Alternative(1))
                .unwrap()
                .unwrap();
            assert_eq!(b.top(), Some(Alternative(1)));
            assert_eq!(b.len(), 3);
        }
    }

    #[test]
    fn search_unknown_alternative() {
        let p = profile(2, &[&[0, 1]]);
        assert_eq!(
            search_manipulative_ballot(ScoringRule::Borda, &p, Alternative(2)),
            Err(ManipulabilityErrors::UnknownAlternative(Alternative(2)))
        );
    }

    #[test]
    fn search_is_sound_and_idempotent() {
        init();
        for p in random_profiles(11, 90) {
            for rule in ScoringRule::ALL {
                for favourite in p.alternatives() {
                    let res = search_manipulative_ballot(rule, &p, favourite).unwrap();
                    assert_eq!(
                        search_manipulative_ballot(rule, &p, favourite).unwrap(),
                        res
                    );
                    if let Some(ballot) = res {
                        let full = p.with_ballot(&ballot).unwrap();
                        assert!(winners(rule, &full).unwrap().contains(&favourite));
                        assert_eq!(ballot.top(), Some(favourite));
                    }
                }
            }
        }
    }

    #[test]
    fn borda_profile_manipulable_by_burying() {
        init();
        let p = profile(
            4,
            &[
                &[0, 1, 2, 3],
                &[0, 1, 2, 3],
                &[0, 1, 2, 3],
                &[1, 0, 2, 3],
                &[3, 2, 1, 0],
            ],
        );
        // Voter 3 moves the winner down, which ties 1 with 0 (10 points each).
        let m = find_manipulation(ScoringRule::Borda, &p).unwrap().unwrap();
        assert_eq!(m.voter, 3);
        assert_eq!(m.target, Alternative(1));
        assert_eq!(m.truthful_ballot, Ballot::from_indices(&[1, 0, 2, 3]));
        assert_eq!(m.manipulative_ballot, Ballot::from_indices(&[1, 2, 0, 3]));
        assert_eq!(is_manipulable(ScoringRule::Borda, &p), Ok(true));
    }

    #[test]
    fn plurality_tie_not_manipulable() {
        init();
        let p = profile(3, &[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]]);
        assert_eq!(is_manipulable(ScoringRule::Plurality, &p), Ok(false));
        assert_eq!(is_manipulable(ScoringRule::Copeland, &p), Ok(false));
    }

    #[test]
    fn small_manipulable_profiles() {
        init();
        let p = profile(3, &[&[0, 1, 2], &[1, 0, 2], &[2, 1, 0]]);
        assert_eq!(is_manipulable(ScoringRule::Borda, &p), Ok(true));
        assert_eq!(is_manipulable(ScoringRule::Copeland, &p), Ok(true));

        let p = profile(3, &[&[0, 1, 2], &[0, 2, 1], &[1, 2, 0], &[2, 1, 0]]);
        let m = find_manipulation(ScoringRule::Plurality, &p).unwrap().unwrap();
        assert_eq!(m.voter, 2);
        assert_eq!(m.target, Alternative(2));
        assert_eq!(m.manipulative_ballot, Ballot::from_indices(&[2, 0, 1]));
    }

    #[test]
    fn scan_stops_at_first_winner() {
        init();
        // Both voters already see their first choice among the winners, even
        // though the second voter could elect 2 alone with the first voter.
        let p = profile(3, &[&[0, 1, 2], &[1, 2, 0]]);
        assert_eq!(winners(ScoringRule::Plurality, &p), Ok(alts(&[0, 1])));
        assert_eq!(is_manipulable(ScoringRule::Plurality, &p), Ok(false));
    }

    #[test]
    fn single_alternative_never_manipulable() {
        init();
        let p = profile(1, &[&[0], &[0], &[0]]);
        for rule in ScoringRule::ALL {
            assert_eq!(winners(rule, &p), Ok(alts(&[0])));
            assert_eq!(is_manipulable(rule, &p), Ok(false));
        }
    }

    #[test]
    fn two_alternatives_borda_matches_plurality() {
        let mut rng = StdRng::seed_from_u64(3);
        for n_voters in 1..8 {
            let p = generate_profile(2, n_voters, &mut rng).unwrap();
            assert_eq!(
                winners(ScoringRule::Borda, &p),
                winners(ScoringRule::Plurality, &p)
            );
        }
    }

    #[test]
    fn manipulability_is_deterministic() {
        init();
        for p in random_profiles(5, 60) {
            for rule in ScoringRule::ALL {
                let first = find_manipulation(rule, &p).unwrap();
                assert_eq!(find_manipulation(rule, &p).unwrap(), first);
                if let Some(m) = first {
                    // The voter really gets the target elected.
                    let full = p
                        .without_voter(m.voter)
                        .with_ballot(&m.manipulative_ballot)
                        .unwrap();
                    assert!(winners(rule, &full).unwrap().contains(&m.target));
                    assert!(!winners(rule, &p).unwrap().contains(&m.target));
                }
            }
        }
    }
}
