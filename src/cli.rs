use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "deptree-checkr",
    about = "Resolve each pom.xml dependency in isolation and collect Maven dependency trees",
    version
)]
pub struct Cli {
    /// Path to the host pom.xml
    pub pom: PathBuf,

    /// Spring Boot BOM version pinned into every synthetic pom
    #[arg(long = "sb-version", value_name = "VERSION")]
    pub sb_version: String,

    /// Camel Spring Boot BOM version pinned into every synthetic pom
    #[arg(long = "csb-version", value_name = "VERSION")]
    pub csb_version: String,

    /// Consolidated dependency tree report path
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,

    /// Maven installation root [fallback: config file, then $MAVEN_HOME]
    #[arg(long = "maven-home", value_name = "DIR")]
    pub maven_home: Option<PathBuf>,

    /// Maximum concurrent Maven invocations [default: available cores]
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Directory for generated per-dependency poms [default: current directory]
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Config file [default: ./.deptree-checkr/config.toml, fallback ~/.config/deptree-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}
