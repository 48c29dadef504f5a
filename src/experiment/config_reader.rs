use crate::experiment::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_RESULTS_DIRECTORY: &str = "results";
pub const DEFAULT_RESULTS_FILE_NAME: &str = "results.txt";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "resultsDirectory")]
    pub results_directory: Option<String>,
    #[serde(rename = "resultsFileName")]
    pub results_file_name: Option<String>,
    #[serde(rename = "summaryPath")]
    pub summary_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub rule: String,
    pub alternatives: usize,
    pub voters: usize,
    pub samples: u64,
}

impl ExperimentConfig {
    pub fn settings(&self) -> ExpResult<ExperimentSettings> {
        let rule: ScoringRule = self.rule.parse().context(ManipulabilitySnafu {})?;
        ensure!(
            self.alternatives > 0,
            InvalidSettingsSnafu {
                message: format!("experiment {:?}: at least one alternative is needed", self)
            }
        );
        ensure!(
            self.voters > 0,
            InvalidSettingsSnafu {
                message: format!("experiment {:?}: at least one voter is needed", self)
            }
        );
        Ok(ExperimentSettings {
            rule,
            num_alternatives: self.alternatives,
            num_voters: self.voters,
            num_samples: self.samples,
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "randomSeed")]
    _random_seed: Option<JSValue>,
    pub experiments: Vec<ExperimentConfig>,
}

impl BatchConfig {
    pub fn random_seed(&self) -> ExpResult<Option<u64>> {
        match &self._random_seed {
            None | Some(JSValue::Null) => Ok(None),
            x => read_js_int(x).map(Some),
        }
    }
}

pub fn read_config(path: &str) -> ExpResult<BatchConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> ExpResult<BatchConfig> {
    let config: BatchConfig = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    debug!("parse_config: {:?}", config);
    Ok(config)
}

fn read_js_int(x: &Option<JSValue>) -> ExpResult<u64> {
    match x {
        Some(JSValue::Number(n)) => n.as_u64().context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s.parse::<u64>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = parse_config(
            r#"{
            "outputSettings": {
                "resultsDirectory": "out",
                "resultsFileName": "first_test"
            },
            "randomSeed": "42",
            "experiments": [
                { "rule": "plurality", "alternatives": 4, "voters": 4, "samples": 100 },
                { "rule": "Copeland", "alternatives": 10, "voters": 15, "samples": 10 }
            ]
        }"#,
        )
        .unwrap();
        assert_eq!(config.output_settings.results_directory, Some("out".to_string()));
        assert_eq!(config.output_settings.summary_path, None);
        assert_eq!(config.random_seed().unwrap(), Some(42));
        assert_eq!(config.experiments.len(), 2);
        assert_eq!(
            config.experiments[1].settings().unwrap(),
            ExperimentSettings {
                rule: ScoringRule::Copeland,
                num_alternatives: 10,
                num_voters: 15,
                num_samples: 10,
            }
        );
    }

    #[test]
    fn parse_minimal_config() {
        let config = parse_config(
            r#"{"randomSeed": 7, "experiments": [{ "rule": "borda", "alternatives": 3, "voters": 2, "samples": 1 }]}"#,
        )
        .unwrap();
        assert_eq!(config.output_settings, OutputSettings::default());
        assert_eq!(config.random_seed().unwrap(), Some(7));
    }

    #[test]
    fn invalid_configs() {
        assert!(matches!(
            parse_config("{\"experiments\": 3}"),
            Err(ExperimentError::ParsingJson { .. })
        ));
        let config = parse_config(
            r#"{"randomSeed": "abc", "experiments": [{ "rule": "approval", "alternatives": 3, "voters": 2, "samples": 1 }]}"#,
        )
        .unwrap();
        assert!(matches!(
            config.random_seed(),
            Err(ExperimentError::ParsingJsonNumber {})
        ));
        assert!(matches!(
            config.experiments[0].settings(),
            Err(ExperimentError::Manipulability { .. })
        ));
        let no_voter = ExperimentConfig {
            rule: "borda".to_string(),
            alternatives: 3,
            voters: 0,
            samples: 1,
        };
        assert!(matches!(
            no_voter.settings(),
            Err(ExperimentError::InvalidSettings { .. })
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_config("/nonexistent/manipulability/config.json"),
            Err(ExperimentError::OpeningJson { .. })
        ));
    }
}
