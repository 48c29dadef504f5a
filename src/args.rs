use clap::Parser;

/// Estimates how often random voting profiles are manipulable under a scoring rule.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing a batch of experiments. See the manual
    /// for the format. If not provided, a single experiment is described with the
    /// --rule, --alternatives, --voters and --samples options.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (plurality, borda or copeland) The scoring rule of the single experiment.
    #[clap(short, long, value_parser)]
    pub rule: Option<String>,

    /// The number of alternatives in each random profile.
    #[clap(short, long, value_parser)]
    pub alternatives: Option<usize>,

    /// The number of voters in each random profile.
    #[clap(short, long, value_parser)]
    pub voters: Option<usize>,

    /// The number of random profiles to draw.
    #[clap(short, long, value_parser)]
    pub samples: Option<u64>,

    /// (integer, optional) The seed of the random generator. Runs with the same seed draw the
    /// same profiles. Setting this option overrides the seed of the --config file.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// (directory path, default 'results') The directory of the results file. It is created
    /// if needed. Setting this option overrides the directory of the --config file.
    #[clap(long, value_parser)]
    pub results_dir: Option<String>,

    /// (file name) The name of the results file. Setting this option overrides the name
    /// of the --config file.
    #[clap(long, value_parser)]
    pub results_file: Option<String>,

    /// (file path, 'stdout' or empty) If specified, a summary of the experiments will be
    /// written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
