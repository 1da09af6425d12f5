use crate::constants::{default_archive_base_url, default_index_url, default_timeout};
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImporterConfiguration {
    #[serde(default = "default_index_url")]
    pub index_url: String,
    #[serde(default = "default_archive_base_url")]
    pub archive_base_url: String,
    /// Request timeout in seconds for each index or archive download.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ImporterConfiguration {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            archive_base_url: default_archive_base_url(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    #[serde(default)]
    pub importer: ImporterConfiguration,
}

pub fn read_configuration(arguments: Vec<String>) -> Result<Configuration> {
    let file_path = arguments
        .get(1)
        .ok_or_else(|| Error::msg("Configuration path argument missing"))?;

    let configuration_string = read_to_string(file_path)?;
    Ok(serde_yaml::from_str(&configuration_string)?)
}
