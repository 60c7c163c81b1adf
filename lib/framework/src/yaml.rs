use std::fs::read_to_string;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use serde::de;

pub fn load_file<T>(path: &Path) -> Result<T>
where
    T: de::DeserializeOwned,
{
    let yaml = read_to_string(path).with_context(|| format!("failed to read file, path={}", path.to_string_lossy()))?;
    from_yaml(&yaml).with_context(|| format!("failed to load config, path={}", path.to_string_lossy()))
}

pub fn from_yaml<T>(yaml: &str) -> Result<T>
where
    T: de::DeserializeOwned,
{
    serde_yaml::from_str(yaml).context("failed to deserialize yaml")
}
