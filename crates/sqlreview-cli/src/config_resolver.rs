//! Configuration file discovery.
//!
//! Priority order: the explicit `--config` path, then a project-local
//! `sqlreview.toml` (dot-prefixed fallback accepted), then the global
//! `~/.sqlreview/config.toml`. When nothing is found, defaults apply.

use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: [&str; 2] = ["sqlreview.toml", ".sqlreview.toml"];

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config`.
    Explicit(PathBuf),
    /// Found next to the project.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config came from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Resolves the configuration file for a project directory.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_from(project_dir, explicit, global_candidate())
}

/// Resolution core, with the global candidate injected so tests do not
/// depend on the environment.
fn resolve_from(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_config: Option<PathBuf>,
) -> ConfigSource {
    if let Some(path) = explicit {
        // Trusted as-is; a missing file surfaces as a load error later.
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.exists())
    {
        tracing::debug!("using project config {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(found) = global_config.filter(|candidate| candidate.exists()) {
        tracing::debug!("using global config {}", found.display());
        return ConfigSource::Global(found);
    }

    ConfigSource::Default
}

/// Returns the global config file candidate.
///
/// `$SQLREVIEW_CONFIG_DIR` overrides `~/.sqlreview` for tests and CI.
fn global_candidate() -> Option<PathBuf> {
    let dir = match std::env::var_os("SQLREVIEW_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => home::home_dir()?.join(".sqlreview"),
    };
    Some(dir.join("config.toml"))
}
