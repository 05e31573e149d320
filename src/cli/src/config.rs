use std::{fs, path::Path};

use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};

/// Settings read from the optional TOML configuration file. Missing keys take
/// their default value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of quarter turns in a random scramble
    pub scramble_length: usize,
    /// Seed for random scrambles; a fresh one is used when absent
    pub seed: Option<u64>,
    /// Print the cube net before and after solving
    pub show_net: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scramble_length: 25,
            seed: None,
            show_net: true,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> color_eyre::Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read the configuration file {}", path.display()))?;

        toml::from_str(&text)
            .wrap_err_with(|| format!("Failed to parse the configuration file {}", path.display()))
    }
}
