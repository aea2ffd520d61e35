use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use winequality::dataset::{DEFAULT_SAMPLE_SEED, DEFAULT_SAMPLE_SIZE};
use winequality::FormInput;

pub const DEFAULT_BIND: &str = "127.0.0.1:9000";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub model_path: PathBuf,
    pub dataset_path: PathBuf,
    pub bind: SocketAddr,
    pub sample_size: usize,
    pub sample_seed: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("rf_model.json"),
            dataset_path: PathBuf::from("red_wine_quality.csv"),
            bind: SocketAddr::from(([127, 0, 0, 1], 9000)),
            sample_size: DEFAULT_SAMPLE_SIZE,
            sample_seed: DEFAULT_SAMPLE_SEED,
        }
    }
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading server config {}", path_ref.display()))?;
        let config: ServerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing server config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        model_path: PathBuf,
        dataset_path: PathBuf,
        bind: SocketAddr,
        sample_size: usize,
        sample_seed: u64,
    ) -> Self {
        Self {
            model_path,
            dataset_path,
            bind,
            sample_size,
            sample_seed,
        }
    }
}

/// Reads a one-shot submission (name, surname, features) from YAML.
pub fn load_form_input<P: AsRef<Path>>(path: P) -> anyhow::Result<FormInput> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading submission {}", path_ref.display()))?;
    let input: FormInput = serde_yaml::from_str(&contents)
        .with_context(|| format!("parsing submission {}", path_ref.display()))?;
    Ok(input)
}
