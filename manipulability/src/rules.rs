// The scoring rules.
//
// All the rules start from an explicit zero score for every alternative, so that
// alternatives without any point still show up in the result.

use log::debug;

use crate::config::*;

impl ScoringRule {
    /// Computes the score of every alternative of the profile.
    pub fn scores(&self, profile: &Profile) -> ScoreMap {
        let res = match self {
            ScoringRule::Plurality => plurality_scores(profile),
            ScoringRule::Borda => borda_scores(profile),
            ScoringRule::Copeland => copeland_scores(profile),
        };
        debug!("scores: rule: {} scores: {:?}", self, res.0);
        res
    }
}

pub fn plurality_scores(profile: &Profile) -> ScoreMap {
    let mut scores = ScoreMap::zeros(profile.num_alternatives());
    for ballot in profile.ballots() {
        if let Some(top) = ballot.top() {
            scores.add(top, 1);
        }
    }
    scores
}

pub fn borda_scores(profile: &Profile) -> ScoreMap {
    let n = profile.num_alternatives() as Score;
    let mut scores = ScoreMap::zeros(profile.num_alternatives());
    for ballot in profile.ballots() {
        for (idx, a) in ballot.iter().enumerate() {
            let position = idx as Score + 1;
            scores.add(*a, n - position);
        }
    }
    scores
}

pub fn copeland_scores(profile: &Profile) -> ScoreMap {
    let n = profile.num_alternatives();
    // preferred[a][b]: the number of ballots ranking a above b.
    let mut preferred: Vec<Vec<u64>> = vec![vec![0; n]; n];
    for ballot in profile.ballots() {
        let alts = ballot.alternatives();
        for (i_top, top) in alts.iter().enumerate() {
            for bottom in alts[i_top + 1..].iter() {
                preferred[top.index()][bottom.index()] += 1;
            }
        }
    }

    let mut scores = ScoreMap::zeros(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (Alternative(i as u32), Alternative(j as u32));
            match preferred[i][j].cmp(&preferred[j][i]) {
                std::cmp::Ordering::Greater => {
                    scores.add(a, 1);
                    scores.add(b, -1);
                }
                std::cmp::Ordering::Less => {
                    scores.add(a, -1);
                    scores.add(b, 1);
                }
                std::cmp::Ordering::Equal => {}
            }
        }
    }
    scores
}
