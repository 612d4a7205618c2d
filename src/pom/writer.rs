use std::path::Path;

use anyhow::Result;
use quick_xml::se::Serializer;
use serde::Serialize;

use crate::error::Error;
use crate::models::{DependencyDecl, Pom};

const POM_XMLNS: &str = "http://maven.apache.org/POM/4.0.0";

// Serde mirror of the POM schema subset; field names match the XML tags.

#[derive(Serialize)]
#[serde(rename = "project")]
struct XmlProject<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
    #[serde(rename = "modelVersion")]
    model_version: &'a str,
    #[serde(rename = "groupId")]
    group_id: &'a str,
    #[serde(rename = "artifactId")]
    artifact_id: &'a str,
    version: &'a str,
    #[serde(rename = "dependencyManagement", skip_serializing_if = "Option::is_none")]
    dependency_management: Option<XmlDependencyManagement<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependencies: Option<XmlDependencies<'a>>,
}

#[derive(Serialize)]
struct XmlDependencyManagement<'a> {
    dependencies: XmlDependencies<'a>,
}

#[derive(Serialize)]
struct XmlDependencies<'a> {
    dependency: Vec<XmlDependency<'a>>,
}

#[derive(Serialize)]
struct XmlDependency<'a> {
    #[serde(rename = "groupId")]
    group_id: &'a str,
    #[serde(rename = "artifactId")]
    artifact_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    dep_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
}

impl<'a> From<&'a DependencyDecl> for XmlDependency<'a> {
    fn from(dep: &'a DependencyDecl) -> Self {
        Self {
            group_id: &dep.group_id,
            artifact_id: &dep.artifact_id,
            version: dep.version.as_deref(),
            dep_type: dep.dep_type.as_deref(),
            scope: dep.scope.as_deref(),
        }
    }
}

fn to_xml_deps(deps: &[DependencyDecl]) -> Option<XmlDependencies<'_>> {
    if deps.is_empty() {
        return None;
    }
    Some(XmlDependencies {
        dependency: deps.iter().map(XmlDependency::from).collect(),
    })
}

/// Render a descriptor to an XML string with declaration and 2-space indent.
///
/// Deterministic: identical input yields byte-identical output.
pub fn render_pom(pom: &Pom) -> Result<String> {
    let project = XmlProject {
        xmlns: POM_XMLNS,
        model_version: &pom.model_version,
        group_id: &pom.group_id,
        artifact_id: &pom.artifact_id,
        version: &pom.version,
        dependency_management: to_xml_deps(&pom.dependency_management)
            .map(|dependencies| XmlDependencyManagement { dependencies }),
        dependencies: to_xml_deps(&pom.dependencies),
    };

    let mut body = String::new();
    let mut ser = Serializer::new(&mut body);
    ser.indent(' ', 2);
    project.serialize(ser)?;

    let mut out = String::with_capacity(body.len() + 64);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&body);
    out.push('\n');
    Ok(out)
}

/// Serialize a descriptor to disk; fails with [`Error::IoFailure`] on write
/// errors.
pub fn write_pom(pom: &Pom, path: &Path) -> Result<()> {
    let rendered = render_pom(pom)?;
    std::fs::write(path, rendered).map_err(|e| Error::io(path, e))?;
    Ok(())
}
