use super::types::*;
use crate::config::{expand_env_vars, expand_tilde};
use regex::Regex;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation failed:\n{}", .0.join("\n"))]
    ValidationList(Vec<String>),

    #[error("validation failed: {0}")]
    Validation(String),
}

/// Load pipeline parameters from a YAML file.
///
/// `$env{VAR}` references in the raw text are expanded before parsing;
/// variables that stay unexpanded are a hard error rather than a malformed
/// parameter downstream. After parsing, the data directory gets tilde
/// expansion and all sections are validated together so one failed load
/// reports every problem at once.
pub fn load_params(path: &Path) -> Result<PipelineParams, ConfigError> {
    let yaml_string = fs::read_to_string(path).map_err(|e| {
        ConfigError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read parameter file '{}': {}", path.display(), e),
        ))
    })?;

    let yaml_string = expand_env_vars(&yaml_string);
    check_unexpanded_vars(&yaml_string)?;

    let mut params: PipelineParams = serde_yaml::from_str(&yaml_string).map_err(|e| {
        ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("in file '{}': {}", path.display(), e),
        ))
    })?;

    params.event_builder.data_dir = expand_tilde(&params.event_builder.data_dir);

    validate_params(&params)?;

    Ok(params)
}

/// Checks for unexpanded environment variables and reports them by name.
fn check_unexpanded_vars(yaml_string: &str) -> Result<(), ConfigError> {
    let re = Regex::new(r"\$env\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
    let mut unexpanded: Vec<String> = re
        .captures_iter(yaml_string)
        .map(|caps| caps.get(1).unwrap().as_str().to_string())
        .collect();

    if unexpanded.is_empty() {
        return Ok(());
    }

    unexpanded.sort();
    unexpanded.dedup();

    Err(ConfigError::Validation(format!(
        "environment variables are not set: {}",
        unexpanded.join(", ")
    )))
}

fn validate_params(params: &PipelineParams) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    let eb = &params.event_builder;
    if let Err(e) = eb.validate() {
        errors.push(format!("event_builder: {}", e));
    }

    match &params.aggregator {
        Some(ag) => {
            if let Err(e) = ag.validate() {
                errors.push(format!("aggregator: {}", e));
            }

            if eb.total_aggregators == 0 {
                errors.push(
                    "aggregator section is present but event_builder.total_aggregators is 0"
                        .to_string(),
                );
            }

            // The topology values both sections carry must describe the same
            // pipeline.
            if ag.total_front_end_ranks != eb.total_front_end_ranks {
                errors.push(format!(
                    "total_front_end_ranks disagrees between sections: aggregator has {}, event_builder has {}",
                    ag.total_front_end_ranks, eb.total_front_end_ranks
                ));
            }
            if ag.total_event_builders != eb.total_event_builders {
                errors.push(format!(
                    "total_event_builders disagrees between sections: aggregator has {}, event_builder has {}",
                    ag.total_event_builders, eb.total_event_builders
                ));
            }
            if ag.max_fragment_size_words != eb.max_fragment_size_words {
                errors.push(format!(
                    "max_fragment_size_words disagrees between sections: aggregator has {}, event_builder has {}",
                    ag.max_fragment_size_words, eb.max_fragment_size_words
                ));
            }
        }
        None => {
            if eb.total_aggregators >= 1 {
                errors.push(format!(
                    "event_builder.total_aggregators is {} but no aggregator section is present",
                    eb.total_aggregators
                ));
            }
        }
    }

    if eb.eb_index >= eb.total_event_builders {
        errors.push(format!(
            "event_builder.eb_index {} is out of range for {} event builders",
            eb.eb_index, eb.total_event_builders
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationList(errors))
    }
}
