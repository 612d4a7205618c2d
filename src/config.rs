use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::cli::Cli;

/// Optional file-backed defaults, deserialized from
/// `.deptree-checkr/config.toml`. Everything here can also be supplied on the
/// command line; CLI values take precedence.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Maven installation root.
    #[serde(default)]
    pub maven_home: Option<PathBuf>,
    /// Maximum concurrent Maven invocations.
    #[serde(default)]
    pub jobs: Option<usize>,
    /// Directory for generated per-dependency poms.
    #[serde(default)]
    pub workdir: Option<PathBuf>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.deptree-checkr/config.toml`
/// 3. `~/.config/deptree-checkr/config.toml`
/// 4. Built-in [`Config::default`] (everything unset)
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        return toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()));
    }

    let project_config = Path::new(".deptree-checkr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("deptree-checkr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}

/// Effective run settings after merging CLI, config file, and environment.
#[derive(Debug)]
pub struct Settings {
    pub maven_home: PathBuf,
    pub jobs: usize,
    pub workdir: PathBuf,
}

impl Settings {
    /// Merge precedence: CLI > config file > environment/defaults.
    ///
    /// `maven_home` is required semantically; if no layer supplies it the run
    /// aborts before any work begins.
    pub fn merge(cli: &Cli, config: Config) -> Result<Self> {
        let maven_home = cli
            .maven_home
            .clone()
            .or(config.maven_home)
            .or_else(|| std::env::var_os("MAVEN_HOME").map(PathBuf::from));
        let Some(maven_home) = maven_home else {
            bail!("maven home not configured; pass --maven-home, set it in the config file, or export MAVEN_HOME");
        };

        let jobs = cli
            .jobs
            .or(config.jobs)
            .unwrap_or_else(default_jobs)
            .max(1);

        let workdir = cli
            .workdir
            .clone()
            .or(config.workdir)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Settings {
            maven_home,
            jobs,
            workdir,
        })
    }
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4)
}
