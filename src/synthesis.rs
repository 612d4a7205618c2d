//! Synthetic descriptor construction.

use crate::models::{DependencyDecl, PlatformBaseline, Pom};

pub const SYNTHETIC_VERSION: &str = "1.0.0-SNAPSHOT";

/// Build the minimal descriptor that resolves one dependency in isolation.
///
/// Identity is a derived test coordinate (`test.<group>` / `test.<artifact>`),
/// dependency-management holds exactly the two baseline BOM imports, and the
/// dependency under test is the sole direct dependency. Pure and
/// deterministic; the host's own transitive metadata never leaks in.
pub fn build_synthetic(baseline: &PlatformBaseline, dependency: &DependencyDecl) -> Pom {
    Pom {
        model_version: "4.0.0".to_string(),
        group_id: format!("test.{}", dependency.group_id),
        artifact_id: format!("test.{}", dependency.artifact_id),
        version: SYNTHETIC_VERSION.to_string(),
        dependencies: vec![dependency.clone()],
        dependency_management: baseline.managed_imports(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pom::render_pom;

    fn baseline() -> PlatformBaseline {
        PlatformBaseline::new("3.1.0".to_string(), "4.2.0".to_string())
    }

    fn dep(group: &str, artifact: &str, version: Option<&str>) -> DependencyDecl {
        DependencyDecl {
            group_id: group.to_string(),
            artifact_id: artifact.to_string(),
            version: version.map(String::from),
            scope: None,
            dep_type: None,
        }
    }

    #[test]
    fn test_exactly_two_imports_plus_dependency() {
        let d = dep("a", "x", Some("1.0"));
        let pom = build_synthetic(&baseline(), &d);

        assert_eq!(pom.group_id, "test.a");
        assert_eq!(pom.artifact_id, "test.x");
        assert_eq!(pom.version, SYNTHETIC_VERSION);
        assert_eq!(pom.dependency_management.len(), 2);
        assert_eq!(pom.dependencies, vec![d]);
    }

    #[test]
    fn test_baseline_versions_flow_into_imports() {
        let pom = build_synthetic(&baseline(), &dep("b", "y", Some("2.0")));
        let versions: Vec<_> = pom
            .dependency_management
            .iter()
            .map(|m| m.version.as_deref())
            .collect();
        assert_eq!(versions, vec![Some("3.1.0"), Some("4.2.0")]);
    }

    #[test]
    fn test_idempotent_byte_identical() {
        let d = dep("org.apache.camel.springboot", "camel-kafka-starter", None);
        let first = render_pom(&build_synthetic(&baseline(), &d)).unwrap();
        let second = render_pom(&build_synthetic(&baseline(), &d)).unwrap();
        assert_eq!(first, second);
    }
}
