use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// "sqlite" | "memory"
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Database file; relative paths resolve against the data directory
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_backend() -> String {
    "sqlite".into()
}

fn default_path() -> String {
    "dishswipe.db".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_path(),
        }
    }
}

impl StoreConfig {
    /// Resolve `path` to an absolute database location, expanding `~`.
    pub fn resolve_path(&self, data_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&self.path);
        let candidate = PathBuf::from(expanded.as_ref());
        if candidate.is_absolute() {
            candidate
        } else {
            data_dir.join(candidate)
        }
    }
}
