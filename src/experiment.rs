use log::{debug, info};

use manipulability::experiment::run_experiment;
use manipulability::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::args::Args;
use crate::experiment::config_reader::*;
use crate::experiment::io_report::*;

pub mod config_reader;
pub mod io_report;

#[derive(Debug, Snafu)]
pub enum ExperimentError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected an integer in the configuration"))]
    ParsingJsonNumber {},
    #[snafu(display("Invalid experiment settings: {message}"))]
    InvalidSettings { message: String },
    #[snafu(display("Error creating results directory {path}"))]
    CreatingResultsDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing results to {path}"))]
    WritingResults {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("{source}"))]
    Manipulability { source: ManipulabilityErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ExpResult<T> = Result<T, ExperimentError>;

/// A batch of experiments, with everything needed to run it and to store the
/// results.
#[derive(PartialEq, Debug, Clone)]
pub struct Batch {
    pub results_directory: PathBuf,
    pub results_file_name: String,
    /// A path or 'stdout'.
    pub summary_path: Option<String>,
    /// Drawn from the system entropy if not provided.
    pub seed: Option<u64>,
    pub experiments: Vec<ExperimentSettings>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ExperimentOutcome {
    pub settings: ExperimentSettings,
    pub stats: ExperimentStats,
}

/// Runs all the experiments of the batch in order, prints the report of each one
/// and writes the results file.
///
/// A single random generator is shared by all the experiments of the batch.
pub fn run_batch(batch: &Batch) -> ExpResult<Vec<ExperimentOutcome>> {
    info!("run_batch: {} experiments", batch.experiments.len());
    let mut rng = match batch.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut outcomes: Vec<ExperimentOutcome> = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    for settings in batch.experiments.iter() {
        let stats = run_experiment(settings, &mut rng).context(ManipulabilitySnafu {})?;
        let line = format_report(settings, &stats);
        println!("{}", line);
        lines.push(line);
        outcomes.push(ExperimentOutcome {
            settings: settings.clone(),
            stats,
        });
    }

    write_results(&batch.results_directory, &batch.results_file_name, &lines)?;

    if let Some(out) = &batch.summary_path {
        write_summary(out, &build_summary_js(batch, &outcomes))?;
    }
    Ok(outcomes)
}

fn single_experiment(args: &Args) -> ExpResult<ExperimentSettings> {
    match (&args.rule, args.alternatives, args.voters, args.samples) {
        (Some(rule), Some(alternatives), Some(voters), Some(samples)) => ExperimentConfig {
            rule: rule.clone(),
            alternatives,
            voters,
            samples,
        }
        .settings(),
        _ => whatever!(
            "Either --config or all of --rule, --alternatives, --voters and --samples must be provided"
        ),
    }
}

/// Assembles the batch described by the command line arguments.
///
/// With a configuration file, the arguments override its output settings and its
/// seed. Otherwise, the arguments describe a single experiment.
pub fn batch_from_args(args: &Args) -> ExpResult<Batch> {
    let (config, experiments) = if let Some(config_path) = &args.config {
        let config = read_config(config_path)?;
        let experiments = config
            .experiments
            .iter()
            .map(|e| e.settings())
            .collect::<ExpResult<Vec<ExperimentSettings>>>()?;
        (Some(config), experiments)
    } else {
        (None, vec![single_experiment(args)?])
    };

    let output_settings = config
        .as_ref()
        .map(|c| c.output_settings.clone())
        .unwrap_or_default();

    let seed = match (args.seed, &config) {
        (Some(s), _) => Some(s),
        (None, Some(c)) => c.random_seed()?,
        (None, None) => None,
    };

    let results_directory = args
        .results_dir
        .clone()
        .or(output_settings.results_directory)
        .unwrap_or_else(|| DEFAULT_RESULTS_DIRECTORY.to_string());

    let results_file_name = match (&args.results_file, output_settings.results_file_name, &config) {
        (Some(name), _, _) => name.clone(),
        (None, Some(name), _) => name,
        (None, None, Some(_)) => DEFAULT_RESULTS_FILE_NAME.to_string(),
        (None, None, None) => {
            let s = &experiments[0];
            format!(
                "{}_{}_{}_{}.txt",
                s.rule, s.num_alternatives, s.num_voters, s.num_samples
            )
        }
    };

    let batch = Batch {
        results_directory: PathBuf::from(results_directory),
        results_file_name,
        summary_path: args.out.clone().or(output_settings.summary_path),
        seed,
        experiments,
    };
    debug!("batch_from_args: {:?}", batch);
    Ok(batch)
}

pub fn run_from_args(args: &Args) -> ExpResult<()> {
    let batch = batch_from_args(args)?;
    run_batch(&batch)?;
    Ok(())
}
