//! Domain types shared across the pipeline.

/// A parsed Maven project descriptor.
///
/// Covers the subset of the POM schema this tool reads and writes: project
/// identity, direct dependencies, and dependency-management entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pom {
    pub model_version: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub dependencies: Vec<DependencyDecl>,
    pub dependency_management: Vec<DependencyDecl>,
}

/// One `<dependency>` declaration.
///
/// `version`, `scope`, and `dep_type` are optional in the schema; hosts
/// commonly omit the version and rely on managed entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDecl {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub dep_type: Option<String>,
}

impl DependencyDecl {
    /// Coordinate key used throughout the run: `group:artifact`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

impl std::fmt::Display for DependencyDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{}:{}", self.group_id, self.artifact_id, v),
            None => write!(f, "{}:{}", self.group_id, self.artifact_id),
        }
    }
}

pub const SPRING_BOOT_BOM_GROUP: &str = "org.springframework.boot";
pub const SPRING_BOOT_BOM_ARTIFACT: &str = "spring-boot-dependencies";
pub const CAMEL_SPRING_BOOT_BOM_GROUP: &str = "org.apache.camel.springboot";
pub const CAMEL_SPRING_BOOT_BOM_ARTIFACT: &str = "camel-spring-boot-bom";

/// The fixed pair of BOM imports pinned into every synthetic descriptor.
///
/// Built once per run from CLI-supplied versions; immutable afterwards.
#[derive(Debug, Clone)]
pub struct PlatformBaseline {
    pub spring_boot_version: String,
    pub camel_spring_boot_version: String,
}

impl PlatformBaseline {
    pub fn new(spring_boot_version: String, camel_spring_boot_version: String) -> Self {
        Self {
            spring_boot_version,
            camel_spring_boot_version,
        }
    }

    /// The two managed imports, each `type=pom` / `scope=import`.
    pub fn managed_imports(&self) -> Vec<DependencyDecl> {
        vec![
            DependencyDecl {
                group_id: SPRING_BOOT_BOM_GROUP.to_string(),
                artifact_id: SPRING_BOOT_BOM_ARTIFACT.to_string(),
                version: Some(self.spring_boot_version.clone()),
                scope: Some("import".to_string()),
                dep_type: Some("pom".to_string()),
            },
            DependencyDecl {
                group_id: CAMEL_SPRING_BOOT_BOM_GROUP.to_string(),
                artifact_id: CAMEL_SPRING_BOOT_BOM_ARTIFACT.to_string(),
                version: Some(self.camel_spring_boot_version.clone()),
                scope: Some("import".to_string()),
                dep_type: Some("pom".to_string()),
            },
        ]
    }
}
