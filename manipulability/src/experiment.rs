use log::{debug, info};
use rand::Rng;

use crate::config::*;
use crate::generator::generate_profile;
use crate::is_manipulable;

/// Draws random profiles and counts how many of them are manipulable under the
/// rule.
pub fn run_experiment<R: Rng>(
    settings: &ExperimentSettings,
    rng: &mut R,
) -> Result<ExperimentStats, ManipulabilityErrors> {
    info!(
        "run_experiment: rule: {} alternatives: {} voters: {} samples: {}",
        settings.rule, settings.num_alternatives, settings.num_voters, settings.num_samples
    );
    let mut stats = ExperimentStats::default();
    for sample in 0..settings.num_samples {
        let profile = generate_profile(settings.num_alternatives, settings.num_voters, rng)?;
        if is_manipulable(settings.rule, &profile)? {
            stats.manipulable += 1;
        } else {
            stats.nonmanipulable += 1;
        }
        debug!("run_experiment: sample {}: stats: {:?}", sample, stats);
    }
    info!("run_experiment: {:?}", stats);
    Ok(stats)
}
