//! External Maven invocation.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Result;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::Error;

/// The fixed goal requested for every synthetic descriptor.
pub const DEPENDENCY_TREE_GOAL: &str = "dependency:tree";

/// Seam between the dispatcher and the external resolution tool.
pub trait Resolver {
    /// Resolve the descriptor at `descriptor` and return captured stdout
    /// lines in emission order. `coordinate` identifies the dependency under
    /// test for diagnostics.
    async fn resolve(&self, descriptor: &Path, coordinate: &str) -> Result<Vec<String>>;
}

/// Runs `mvn` from a configured Maven installation as a subprocess.
///
/// Maven is an opaque collaborator: descriptor file + goal in, text lines and
/// an exit status out. Nothing of its resolution logic is reproduced here.
pub struct MavenInvoker {
    maven_home: PathBuf,
}

impl MavenInvoker {
    pub fn new(maven_home: PathBuf) -> Self {
        Self { maven_home }
    }

    fn mvn_binary(&self) -> PathBuf {
        let name = if cfg!(windows) { "mvn.cmd" } else { "mvn" };
        self.maven_home.join("bin").join(name)
    }
}

impl Resolver for MavenInvoker {
    async fn resolve(&self, descriptor: &Path, coordinate: &str) -> Result<Vec<String>> {
        let mvn = self.mvn_binary();
        info!("invoking maven for {coordinate}");
        debug!(
            "{} --batch-mode -f {} {}",
            mvn.display(),
            descriptor.display(),
            DEPENDENCY_TREE_GOAL
        );

        let output = Command::new(&mvn)
            .arg("--batch-mode")
            .arg("-f")
            .arg(descriptor)
            .arg(DEPENDENCY_TREE_GOAL)
            .env("MAVEN_HOME", &self.maven_home)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                Error::resolution(
                    coordinate,
                    format!("could not launch {}: {}", mvn.display(), e),
                )
            })?;

        if !output.status.success() {
            return Err(Error::resolution(
                coordinate,
                format!("maven exited with {}", output.status),
            )
            .into());
        }

        let lines = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect();
        Ok(lines)
    }
}
