use std::env;

use tracing::debug;

pub const HF_TOKEN: &str = "HF_TOKEN";

/// Loads `.env` from the working directory or the nearest parent that has one.
/// A missing file is not an error, the process environment is used as is.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("loaded dotenv, path={}", path.to_string_lossy()),
        Err(err) => debug!("dotenv not loaded, error={err}"),
    }
}

// empty values count as unset
pub fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_returns_none_for_unset() {
        assert_eq!(var("FRAMEWORK_TEST_SURELY_UNSET_VARIABLE"), None);
    }

    #[test]
    fn var_reads_process_environment() {
        let path = var("PATH");
        assert!(path.is_some());
    }
}
