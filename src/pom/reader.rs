use std::path::Path;

use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Error;
use crate::models::{DependencyDecl, Pom};

const DIRECT_DEP_PATH: [&str; 3] = ["project", "dependencies", "dependency"];
const MANAGED_DEP_PATH: [&str; 4] = [
    "project",
    "dependencyManagement",
    "dependencies",
    "dependency",
];

/// Load and parse a POM descriptor.
///
/// Fails with [`Error::MalformedDescriptor`] if the file is absent, is not
/// well-formed XML, or declares a dependency without `groupId`/`artifactId`.
pub fn load_pom(path: &Path) -> Result<Pom> {
    let content =
        std::fs::read_to_string(path).map_err(|e| Error::malformed(path, e.to_string()))?;
    parse_pom(&content).map_err(|reason| Error::malformed(path, reason).into())
}

/// A `<dependency>` element currently being collected, with the stack depth
/// at which it was opened so nested blocks (exclusions) are skipped.
struct PendingDependency {
    depth: usize,
    managed: bool,
    group_id: String,
    artifact_id: String,
    version: Option<String>,
    scope: Option<String>,
    dep_type: Option<String>,
}

impl PendingDependency {
    fn new(depth: usize, managed: bool) -> Self {
        Self {
            depth,
            managed,
            group_id: String::new(),
            artifact_id: String::new(),
            version: None,
            scope: None,
            dep_type: None,
        }
    }
}

/// Parse a POM from an XML string using the quick-xml event API.
///
/// A stack of open tag names tracks the current element path, so only
/// `project > dependencies > dependency` and
/// `project > dependencyManagement > dependencies > dependency` are collected;
/// dependencies under plugins or profiles are ignored.
fn parse_pom(xml: &str) -> Result<Pom, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pom = Pom {
        model_version: "4.0.0".to_string(),
        group_id: String::new(),
        artifact_id: String::new(),
        version: String::new(),
        dependencies: Vec::new(),
        dependency_management: Vec::new(),
    };

    let mut stack: Vec<String> = Vec::new();
    let mut pending: Option<PendingDependency> = None;
    let mut saw_project = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name =
                    String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                stack.push(name);

                if stack.len() == 1 && stack[0] == "project" {
                    saw_project = true;
                }
                if stack == DIRECT_DEP_PATH {
                    pending = Some(PendingDependency::new(stack.len(), false));
                } else if stack == MANAGED_DEP_PATH {
                    pending = Some(PendingDependency::new(stack.len(), true));
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| format!("invalid xml text: {err}"))?
                    .into_owned();

                match pending.as_mut() {
                    // Direct child of the open <dependency>
                    Some(dep) if stack.len() == dep.depth + 1 => {
                        match stack.last().map(String::as_str) {
                            Some("groupId") => dep.group_id = text,
                            Some("artifactId") => dep.artifact_id = text,
                            Some("version") => dep.version = Some(text),
                            Some("scope") => dep.scope = Some(text),
                            Some("type") => dep.dep_type = Some(text),
                            _ => {}
                        }
                    }
                    // Project identity: direct children of <project>
                    None if stack.len() == 2 && stack[0] == "project" => {
                        match stack[1].as_str() {
                            "modelVersion" => pom.model_version = text,
                            "groupId" => pom.group_id = text,
                            "artifactId" => pom.artifact_id = text,
                            "version" => pom.version = text,
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                if pending
                    .as_ref()
                    .is_some_and(|dep| dep.depth == stack.len())
                {
                    if let Some(dep) = pending.take() {
                        if dep.group_id.is_empty() || dep.artifact_id.is_empty() {
                            return Err(
                                "dependency missing groupId or artifactId".to_string()
                            );
                        }
                        let decl = DependencyDecl {
                            group_id: dep.group_id,
                            artifact_id: dep.artifact_id,
                            version: dep.version,
                            scope: dep.scope,
                            dep_type: dep.dep_type,
                        };
                        if dep.managed {
                            pom.dependency_management.push(decl);
                        } else {
                            pom.dependencies.push(decl);
                        }
                    }
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("xml parse error: {e}")),
            _ => {}
        }
        buf.clear();
    }

    if !saw_project {
        return Err("missing <project> root element".to_string());
    }

    Ok(pom)
}
