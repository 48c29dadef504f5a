pub use crate::config::*;

/// A builder for assembling a profile one ballot at a time.
///
/// Each ballot is checked when it is added, so that errors point to the
/// offending voter.
///
/// ```
/// pub use manipulability::builder::Builder;
/// # use manipulability::ManipulabilityErrors;
///
/// let mut builder = Builder::new(3)?;
/// builder.add_ballot_simple(&[0, 1, 2])?;
/// builder.add_ballot_simple(&[2, 1, 0])?;
/// let profile = builder.build()?;
/// assert_eq!(profile.num_voters(), 2);
///
/// # Ok::<(), ManipulabilityErrors>(())
/// ```
pub struct Builder {
    pub(crate) _num_alternatives: usize,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new(num_alternatives: usize) -> Result<Builder, ManipulabilityErrors> {
        if num_alternatives == 0 {
            return Err(ManipulabilityErrors::NoAlternatives);
        }
        Ok(Builder {
            _num_alternatives: num_alternatives,
            _ballots: Vec::new(),
        })
    }

    /// Adds a ballot given as the indices of the alternatives, from the most
    /// preferred to the least preferred.
    pub fn add_ballot_simple(&mut self, ranking: &[u32]) -> Result<(), ManipulabilityErrors> {
        self.add_ballot(&Ballot::from_indices(ranking))
    }

    /// Adds the same ballot for several voters.
    pub fn add_ballot_repeated(
        &mut self,
        ballot: &Ballot,
        count: u32,
    ) -> Result<(), ManipulabilityErrors> {
        for _ in 0..count {
            self.add_ballot(ballot)?;
        }
        Ok(())
    }

    pub fn add_ballot(&mut self, ballot: &Ballot) -> Result<(), ManipulabilityErrors> {
        // Validate against a single-ballot profile, then fix the voter index.
        match Profile::new(self._num_alternatives, vec![ballot.clone()]) {
            Ok(_) => {
                self._ballots.push(ballot.clone());
                Ok(())
            }
            Err(ManipulabilityErrors::InconsistentBallot {
                expected, found, ..
            }) => Err(ManipulabilityErrors::InconsistentBallot {
                voter: self._ballots.len(),
                expected,
                found,
            }),
            Err(ManipulabilityErrors::InvalidBallot { .. }) => {
                Err(ManipulabilityErrors::InvalidBallot {
                    voter: self._ballots.len(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// The profile with all the ballots added so far. It must contain at least one ballot.
    pub fn build(self) -> Result<Profile, ManipulabilityErrors> {
        if self._ballots.is_empty() {
            return Err(ManipulabilityErrors::EmptyProfile);
        }
        Profile::new(self._num_alternatives, self._ballots)
    }
}
