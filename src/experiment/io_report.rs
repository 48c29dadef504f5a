// Primitives for writing the outcome of the experiments.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;

use crate::experiment::*;

/// The one-line report of an experiment.
pub fn format_report(settings: &ExperimentSettings, stats: &ExperimentStats) -> String {
    format!(
        "Rule: {}. Alternatives: {}. Voters: {}. Samples: {}. Manipulable: {} ({:.2}%). Nonmanipulable: {} ({:.2}%).",
        settings.rule,
        settings.num_alternatives,
        settings.num_voters,
        settings.num_samples,
        stats.manipulable,
        stats.manipulable_percentage(),
        stats.nonmanipulable,
        stats.nonmanipulable_percentage()
    )
}

/// Writes the report lines to the results file, replacing any previous content.
/// The results directory is created if needed.
pub fn write_results(directory: &Path, file_name: &str, lines: &[String]) -> ExpResult<PathBuf> {
    let dir_display = directory.display().to_string();
    fs::create_dir_all(directory).context(CreatingResultsDirSnafu {
        path: dir_display.clone(),
    })?;
    let path = directory.join(file_name);
    let path_display = path.display().to_string();
    info!("Writing results to {:?}", path_display);
    let mut output = File::create(&path).context(WritingResultsSnafu {
        path: path_display.clone(),
    })?;
    for line in lines {
        writeln!(output, "{}", line).context(WritingResultsSnafu {
            path: path_display.clone(),
        })?;
    }
    Ok(path)
}

fn outcome_to_json(outcome: &ExperimentOutcome) -> JSValue {
    let s = &outcome.settings;
    let st = &outcome.stats;
    json!({
        "rule": s.rule.name(),
        "alternatives": s.num_alternatives,
        "voters": s.num_voters,
        "samples": s.num_samples,
        "manipulable": st.manipulable,
        "manipulablePercentage": st.manipulable_percentage(),
        "nonmanipulable": st.nonmanipulable,
        "nonmanipulablePercentage": st.nonmanipulable_percentage(),
    })
}

pub fn build_summary_js(batch: &Batch, outcomes: &[ExperimentOutcome]) -> JSValue {
    let results: Vec<JSValue> = outcomes.iter().map(outcome_to_json).collect();
    json!({
        "config": {
            "resultsDirectory": batch.results_directory.display().to_string(),
            "resultsFileName": batch.results_file_name,
            "randomSeed": batch.seed.map(|s| s.to_string()),
        },
        "results": results
    })
}

/// Writes the summary to the given path, or to the standard output with 'stdout'.
pub fn write_summary(out: &str, summary: &JSValue) -> ExpResult<()> {
    let pretty_js = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty_js);
    } else {
        info!("Writing summary to {:?}", out);
        fs::write(out, pretty_js).context(WritingResultsSnafu { path: out })?;
    }
    Ok(())
}
