use std::ffi::OsString;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use anyhow::bail;

pub trait PathExt {
    /// Joins a `/` separated relative path, rejecting anything that would escape `self`.
    fn join_relative(&self, relative: &str) -> Result<PathBuf>;

    fn append_extension(&self, extension: &str) -> PathBuf;
}

impl PathExt for Path {
    fn join_relative(&self, relative: &str) -> Result<PathBuf> {
        let mut path = self.to_path_buf();
        let mut joined = false;
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => {
                    path.push(part);
                    joined = true;
                }
                Component::CurDir => {}
                _ => bail!("path must stay inside base dir, base={}, path={relative}", self.to_string_lossy()),
            }
        }
        if !joined {
            bail!("path must not be empty, base={}", self.to_string_lossy());
        }
        Ok(path)
    }

    fn append_extension(&self, extension: &str) -> PathBuf {
        let mut path: OsString = self.as_os_str().to_owned();
        path.push(".");
        path.push(extension);
        PathBuf::from(path)
    }
}
