pub mod parse;
pub mod types;

use regex::Regex;
use std::path::{Path, PathBuf};

pub use parse::{load_params, ConfigError};
pub use types::{AggregatorParams, EventBuilderParams, ParamError, PipelineParams};

/// Expands environment variables in a string.
/// Supports $env{VAR_NAME} syntax.
/// If an environment variable is not set, it's left unchanged.
pub fn expand_env_vars(text: &str) -> String {
    let re = Regex::new(r"\$env\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();

    re.replace_all(text, |caps: &regex::Captures| {
        let var_name = caps.get(1).unwrap().as_str();

        std::env::var(var_name).unwrap_or_else(|_| {
            // If not set, return original match unchanged
            caps.get(0).unwrap().as_str().to_string()
        })
    })
    .to_string()
}

/// Expands tilde (~) in paths to the user's home directory.
/// Returns the path unchanged if it doesn't start with a tilde or the home
/// directory cannot be determined.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();

    if path_str.starts_with("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(&path_str[2..]);
        }
    } else if path_str == "~" {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir;
        }
    }

    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_expand_env_vars_set() {
        std::env::set_var("FCLGEN_TEST_DIR", "/daq/data");
        let result = expand_env_vars("data_dir: $env{FCLGEN_TEST_DIR}/run1");
        assert_eq!(result, "data_dir: /daq/data/run1");
        std::env::remove_var("FCLGEN_TEST_DIR");
    }

    #[test]
    fn test_expand_env_vars_unset_left_unchanged() {
        let result = expand_env_vars("data_dir: $env{FCLGEN_UNSET_VAR}");
        assert_eq!(result, "data_dir: $env{FCLGEN_UNSET_VAR}");
    }

    #[test]
    fn test_expand_env_vars_ignores_placeholder_tokens() {
        // %{name} generator placeholders are not environment variables
        let result = expand_env_vars("file_size_MB: %{file_size}");
        assert_eq!(result, "file_size_MB: %{file_size}");
    }

    #[test]
    fn test_expand_tilde_with_path() {
        let expanded = expand_tilde(Path::new("~/daqdata"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("daqdata"));
        }
    }

    #[test]
    fn test_expand_tilde_absolute_path_unchanged() {
        let expanded = expand_tilde(Path::new("/scratch/daqdata"));
        assert_eq!(expanded, Path::new("/scratch/daqdata"));
    }
}
