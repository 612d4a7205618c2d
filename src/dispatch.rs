//! Concurrent fan-out: one resolution job per declared dependency.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use futures::future::try_join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::invoker::Resolver;
use crate::models::{DependencyDecl, PlatformBaseline, Pom};
use crate::pom::write_pom;
use crate::synthesis::build_synthetic;

/// Captured output lines keyed by `group:artifact`, shared by every
/// concurrent job. Inserts go through a lock; the store is consumed once all
/// jobs have completed.
#[derive(Debug, Default)]
pub struct ResultStore {
    entries: Mutex<HashMap<String, Vec<String>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: String, lines: Vec<String>) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, lines);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the store, yielding entries sorted by coordinate key so the
    /// aggregated report is deterministic across runs.
    pub fn into_entries(self) -> Vec<(String, Vec<String>)> {
        let map = self
            .entries
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut entries: Vec<_> = map.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

/// File name for a dependency's synthetic descriptor. Keyed by the full
/// coordinate: two dependencies sharing an artifact id across groups must not
/// overwrite each other mid-run.
pub fn descriptor_file_name(dependency: &DependencyDecl) -> String {
    format!("{}_{}.xml", dependency.group_id, dependency.artifact_id)
}

/// Fan out one resolution job per host dependency.
///
/// Each job builds a synthetic descriptor, writes it into `workdir`, invokes
/// the resolver, and stores the captured lines. Jobs run concurrently, capped
/// at `jobs` in-flight Maven invocations. Fail-fast: the first job error
/// aborts the run and no report is written; descriptor files already on disk
/// are left behind.
pub async fn dispatch<R: Resolver>(
    host: &Pom,
    baseline: &PlatformBaseline,
    resolver: &R,
    workdir: &Path,
    jobs: usize,
    quiet: bool,
) -> Result<ResultStore> {
    let store = ResultStore::new();
    let semaphore = Semaphore::new(jobs.max(1));

    let pb = if !quiet && !host.dependencies.is_empty() {
        let pb = ProgressBar::new(host.dependencies.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let tasks: Vec<_> = host
        .dependencies
        .iter()
        .map(|dependency| {
            let store = &store;
            let semaphore = &semaphore;
            let pb = &pb;
            async move {
                let _permit = semaphore.acquire().await?;

                debug!("building synthetic descriptor for {dependency}");
                let key = dependency.key();
                if let Some(pb) = pb {
                    pb.set_message(key.clone());
                }

                let synthetic = build_synthetic(baseline, dependency);
                let descriptor: PathBuf = workdir.join(descriptor_file_name(dependency));
                write_pom(&synthetic, &descriptor)?;

                let lines = resolver.resolve(&descriptor, &key).await?;
                store.insert(key, lines);

                if let Some(pb) = pb {
                    pb.inc(1);
                }
                Ok::<(), anyhow::Error>(())
            }
        })
        .collect();

    try_join_all(tasks).await?;

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }
    debug!("collected {} dependency trees", store.len());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn dep(group: &str, artifact: &str, version: Option<&str>) -> DependencyDecl {
        DependencyDecl {
            group_id: group.to_string(),
            artifact_id: artifact.to_string(),
            version: version.map(String::from),
            scope: None,
            dep_type: None,
        }
    }

    fn host(deps: Vec<DependencyDecl>) -> Pom {
        Pom {
            model_version: "4.0.0".to_string(),
            group_id: "com.example".to_string(),
            artifact_id: "host".to_string(),
            version: "1.0".to_string(),
            dependencies: deps,
            dependency_management: Vec::new(),
        }
    }

    fn baseline() -> PlatformBaseline {
        PlatformBaseline::new("3.1.0".to_string(), "4.2.0".to_string())
    }

    /// Echoes the coordinate back as a canned tree.
    struct FakeResolver;

    impl Resolver for FakeResolver {
        async fn resolve(&self, _descriptor: &Path, coordinate: &str) -> Result<Vec<String>> {
            Ok(vec![
                format!("[INFO] --- tree for {coordinate} ---"),
                format!("[INFO] {coordinate}:jar"),
            ])
        }
    }

    /// Fails for one coordinate, succeeds for the rest.
    struct FailingResolver {
        fail_on: String,
    }

    impl Resolver for FailingResolver {
        async fn resolve(&self, _descriptor: &Path, coordinate: &str) -> Result<Vec<String>> {
            if coordinate == self.fail_on {
                Err(Error::resolution(coordinate, "maven exited with 1").into())
            } else {
                Ok(vec![format!("[INFO] {coordinate}")])
            }
        }
    }

    #[tokio::test]
    async fn test_one_entry_per_dependency() {
        let dir = tempfile::tempdir().unwrap();
        let host = host(vec![dep("a", "x", Some("1.0")), dep("b", "y", Some("2.0"))]);

        let store = dispatch(&host, &baseline(), &FakeResolver, dir.path(), 4, true)
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
        assert!(dir.path().join("a_x.xml").exists());
        assert!(dir.path().join("b_y.xml").exists());

        let keys: Vec<_> = store.into_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a:x", "b:y"]);
    }

    #[tokio::test]
    async fn test_shared_artifact_id_gets_distinct_descriptors() {
        let dir = tempfile::tempdir().unwrap();
        let host = host(vec![dep("a", "x", None), dep("b", "x", None)]);

        let store = dispatch(&host, &baseline(), &FakeResolver, dir.path(), 4, true)
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
        assert!(dir.path().join("a_x.xml").exists());
        assert!(dir.path().join("b_x.xml").exists());
    }

    #[tokio::test]
    async fn test_zero_dependencies_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = dispatch(&host(vec![]), &baseline(), &FakeResolver, dir.path(), 4, true)
            .await
            .unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_single_failure_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let host = host(vec![dep("a", "x", None), dep("b", "y", None)]);
        let resolver = FailingResolver {
            fail_on: "b:y".to_string(),
        };

        let err = dispatch(&host, &baseline(), &resolver, dir.path(), 4, true)
            .await
            .unwrap_err();

        match err.downcast_ref::<Error>() {
            Some(Error::ResolutionFailure { coordinate, .. }) => assert_eq!(coordinate, "b:y"),
            other => panic!("expected ResolutionFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_entries_sorted_by_coordinate() {
        let dir = tempfile::tempdir().unwrap();
        let host = host(vec![
            dep("z.group", "last", None),
            dep("a.group", "first", None),
            dep("m.group", "middle", None),
        ]);

        let store = dispatch(&host, &baseline(), &FakeResolver, dir.path(), 2, true)
            .await
            .unwrap();

        let keys: Vec<_> = store.into_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a.group:first", "m.group:middle", "z.group:last"]);
    }
}
