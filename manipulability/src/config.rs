// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// An alternative (candidate) of an election.
///
/// Alternatives are numbered `0..n` inside a profile of `n` alternatives.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct Alternative(pub u32);

impl Alternative {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Display for Alternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A total strict order over all the alternatives, from the most preferred
/// to the least preferred.
///
/// A ballot on its own is not checked. It gets validated when it becomes part
/// of a [Profile].
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot(pub(crate) Vec<Alternative>);

impl Ballot {
    pub fn new(alternatives: Vec<Alternative>) -> Ballot {
        Ballot(alternatives)
    }

    pub fn from_indices(indices: &[u32]) -> Ballot {
        Ballot(indices.iter().map(|i| Alternative(*i)).collect())
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most preferred alternative.
    pub fn top(&self) -> Option<Alternative> {
        self.0.first().cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alternative> {
        self.0.iter()
    }

    // True if the ballot is a permutation of 0..num_alternatives.
    fn is_permutation(&self, num_alternatives: usize) -> bool {
        if self.0.len() != num_alternatives {
            return false;
        }
        let mut seen = vec![false; num_alternatives];
        for a in self.0.iter() {
            match seen.get_mut(a.index()) {
                Some(s) if !*s => *s = true,
                _ => return false,
            }
        }
        true
    }
}

impl Display for Ballot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.0.iter().map(|a| a.to_string()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// All the ballots of an election, one per voter.
///
/// The position of a ballot is the identity of its voter.
/// Invariant: every ballot is a permutation of `0..num_alternatives`.
/// A profile may contain no ballot at all: this is how the ballots of the other
/// voters are represented when there is a single voter.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Profile {
    num_alternatives: usize,
    ballots: Vec<Ballot>,
}

impl Profile {
    /// Builds a profile after checking all the ballots.
    pub fn new(
        num_alternatives: usize,
        ballots: Vec<Ballot>,
    ) -> Result<Profile, ManipulabilityErrors> {
        if num_alternatives == 0 {
            return Err(ManipulabilityErrors::NoAlternatives);
        }
        for (voter, b) in ballots.iter().enumerate() {
            if b.len() != num_alternatives {
                return Err(ManipulabilityErrors::InconsistentBallot {
                    voter,
                    expected: num_alternatives,
                    found: b.len(),
                });
            }
            if !b.is_permutation(num_alternatives) {
                return Err(ManipulabilityErrors::InvalidBallot { voter });
            }
        }
        Ok(Profile {
            num_alternatives,
            ballots,
        })
    }

    /// Builds a profile from the ballots only. The number of alternatives is
    /// taken from the first ballot, hence the list must not be empty.
    pub fn from_ballots(ballots: Vec<Ballot>) -> Result<Profile, ManipulabilityErrors> {
        let num_alternatives = ballots
            .first()
            .map(|b| b.len())
            .ok_or(ManipulabilityErrors::EmptyProfile)?;
        Profile::new(num_alternatives, ballots)
    }

    pub fn num_alternatives(&self) -> usize {
        self.num_alternatives
    }

    pub fn num_voters(&self) -> usize {
        self.ballots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn ballot(&self, voter: usize) -> Option<&Ballot> {
        self.ballots.get(voter)
    }

    /// All the alternatives, in ascending order.
    pub fn alternatives(&self) -> impl Iterator<Item = Alternative> {
        (0..self.num_alternatives as u32).map(Alternative)
    }

    pub fn contains(&self, alternative: Alternative) -> bool {
        alternative.index() < self.num_alternatives
    }

    /// The same profile, without the ballot of the given voter.
    ///
    /// The voters after this one are shifted by one position.
    pub fn without_voter(&self, voter: usize) -> Profile {
        let ballots = self
            .ballots
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != voter)
            .map(|(_, b)| b.clone())
            .collect();
        Profile {
            num_alternatives: self.num_alternatives,
            ballots,
        }
    }

    /// The same profile, with an additional ballot for a new last voter.
    pub fn with_ballot(&self, ballot: &Ballot) -> Result<Profile, ManipulabilityErrors> {
        let mut ballots = self.ballots.clone();
        ballots.push(ballot.clone());
        Profile::new(self.num_alternatives, ballots)
    }

    // Only for ballots that are known to be permutations.
    pub(crate) fn with_ballot_unchecked(&self, ballot: Ballot) -> Profile {
        debug_assert!(ballot.is_permutation(self.num_alternatives));
        let mut ballots = self.ballots.clone();
        ballots.push(ballot);
        Profile {
            num_alternatives: self.num_alternatives,
            ballots,
        }
    }
}

// ******** Output data structures *********

pub type Score = i64;

/// The score of each alternative of a profile, indexed by alternative.
///
/// All the alternatives have an entry, even the ones that did not receive any
/// point.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoreMap(pub(crate) Vec<Score>);

impl ScoreMap {
    pub(crate) fn zeros(num_alternatives: usize) -> ScoreMap {
        ScoreMap(vec![0; num_alternatives])
    }

    pub fn get(&self, alternative: Alternative) -> Score {
        self.0[alternative.index()]
    }

    pub(crate) fn add(&mut self, alternative: Alternative, points: Score) {
        self.0[alternative.index()] += points;
    }

    /// The maximum score, if there is at least one alternative.
    pub fn top_score(&self) -> Option<Score> {
        self.0.iter().max().cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Alternative, Score)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, s)| (Alternative(idx as u32), *s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A successful manipulation: the voter can make the target alternative win by
/// submitting the manipulative ballot instead of the truthful one.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Manipulation {
    pub voter: usize,
    pub truthful_ballot: Ballot,
    pub target: Alternative,
    pub manipulative_ballot: Ballot,
}

/// Errors that prevent the algorithms from completing successfully.
///
/// Not finding a manipulative ballot is not an error.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ManipulabilityErrors {
    /// The profile does not contain any ballot.
    EmptyProfile,
    /// A profile needs at least one alternative.
    NoAlternatives,
    /// A ballot does not rank the expected number of alternatives.
    InconsistentBallot {
        voter: usize,
        expected: usize,
        found: usize,
    },
    /// A ballot is not a permutation of the alternatives.
    InvalidBallot { voter: usize },
    /// The alternative is not part of the profile.
    UnknownAlternative(Alternative),
    UnknownRule(String),
}

impl Error for ManipulabilityErrors {}

impl Display for ManipulabilityErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManipulabilityErrors::EmptyProfile => write!(f, "invalid profile: no ballot"),
            ManipulabilityErrors::NoAlternatives => write!(f, "invalid profile: no alternative"),
            ManipulabilityErrors::InconsistentBallot {
                voter,
                expected,
                found,
            } => write!(
                f,
                "invalid profile: ballot of voter {} has {} alternatives, expected {}",
                voter, found, expected
            ),
            ManipulabilityErrors::InvalidBallot { voter } => write!(
                f,
                "invalid profile: ballot of voter {} is not a ranking of all the alternatives",
                voter
            ),
            ManipulabilityErrors::UnknownAlternative(a) => {
                write!(f, "alternative {} is not part of the profile", a)
            }
            ManipulabilityErrors::UnknownRule(name) => write!(f, "unknown scoring rule {:?}", name),
        }
    }
}

// ********* Configuration **********

/// The scoring rules that can be studied.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ScoringRule {
    /// One point for the first alternative of each ballot.
    Plurality,
    /// With n alternatives, n - 1 points for the first one, down to 0 for the last one.
    Borda,
    /// +1 for each pairwise majority contest won, -1 for each one lost.
    Copeland,
}

impl ScoringRule {
    pub const ALL: [ScoringRule; 3] = [
        ScoringRule::Plurality,
        ScoringRule::Borda,
        ScoringRule::Copeland,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScoringRule::Plurality => "plurality",
            ScoringRule::Borda => "borda",
            ScoringRule::Copeland => "copeland",
        }
    }
}

impl Display for ScoringRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ScoringRule {
    type Err = ManipulabilityErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plurality" | "plurality_scores" => Ok(ScoringRule::Plurality),
            "borda" | "borda_scores" => Ok(ScoringRule::Borda),
            "copeland" | "copeland_scores" => Ok(ScoringRule::Copeland),
            _ => Err(ManipulabilityErrors::UnknownRule(s.to_string())),
        }
    }
}

/// The parameters of one Monte-Carlo experiment.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ExperimentSettings {
    pub rule: ScoringRule,
    pub num_alternatives: usize,
    pub num_voters: usize,
    pub num_samples: u64,
}

/// The outcome of an experiment.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct ExperimentStats {
    pub manipulable: u64,
    pub nonmanipulable: u64,
}

impl ExperimentStats {
    pub fn samples(&self) -> u64 {
        self.manipulable + self.nonmanipulable
    }

    pub fn manipulable_percentage(&self) -> f64 {
        percentage(self.manipulable, self.samples())
    }

    pub fn nonmanipulable_percentage(&self) -> f64 {
        percentage(self.nonmanipulable, self.samples())
    }
}

fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
