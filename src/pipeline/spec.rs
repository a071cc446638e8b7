//! Pipeline specification types
//!
//! The declarative input the compiler turns into a job document. A
//! specification is built by the caller (usually through
//! [`decode`](super::decode)), handed to the compiler by reference and
//! dropped once the document is produced.

#![allow(clippy::must_use_candidate)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A complete description of one pipeline job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "super::decode::RawPipelineSpec")]
pub struct PipelineSpec {
    /// Job name on the execution engine
    pub name: String,

    /// Label of the node the job runs on
    pub node_label: String,

    /// Toolchain version key, resolved through a [`ToolchainTable`](super::ToolchainTable)
    #[serde(rename = "jdk")]
    pub toolchain: String,

    /// Source repository to check out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<SourceRepo>,

    /// Optional periodic trigger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_trigger: Option<PeriodTrigger>,

    /// Kind of project being built
    #[serde(rename = "type")]
    pub project_type: ProjectType,

    /// Project configuration, shaped by `project_type`
    pub project: ProjectConfig,

    /// Stages selected for this job
    pub stages: Vec<Stage>,
}

impl PipelineSpec {
    /// Creates a specification with an empty node label, no trigger and no stages
    pub fn new(
        name: impl Into<String>,
        toolchain: impl Into<String>,
        repo: SourceRepo,
        project: ProjectConfig,
        project_type: ProjectType,
    ) -> Self {
        Self {
            name: name.into(),
            node_label: String::new(),
            toolchain: toolchain.into(),
            repo: Some(repo),
            period_trigger: None,
            project_type,
            project,
            stages: Vec::new(),
        }
    }

    /// Sets the selected stages
    #[must_use]
    pub fn with_stages(mut self, stages: impl IntoIterator<Item = Stage>) -> Self {
        self.stages = stages.into_iter().collect();
        self
    }

    /// Sets the node label
    #[must_use]
    pub fn with_node_label(mut self, label: impl Into<String>) -> Self {
        self.node_label = label.into();
        self
    }

    /// Sets the periodic trigger
    #[must_use]
    pub fn with_period_trigger(mut self, trigger: PeriodTrigger) -> Self {
        self.period_trigger = Some(trigger);
        self
    }

    /// Returns true if the stage was selected
    pub fn selects(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    /// Returns the branch of the source repository, or an empty string
    pub fn branch(&self) -> &str {
        self.repo.as_ref().map_or("", |repo| repo.branch.as_str())
    }

    /// Returns the trigger strategy when a trigger is active
    pub fn active_trigger(&self) -> Option<&str> {
        self.period_trigger
            .as_ref()
            .filter(|trigger| !trigger.skipped)
            .map(|trigger| trigger.strategy.as_str())
    }

    /// Renders the runtime phase list passed to the execution engine.
    ///
    /// Stage names are joined with `,` in selection order; repeated stages
    /// are kept only at their first position.
    pub fn perform_phases(&self) -> String {
        let mut seen = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            if !seen.contains(stage) {
                seen.push(*stage);
            }
        }
        seen.iter()
            .map(|stage| stage.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Source code location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRepo {
    /// Clone URL
    #[serde(default)]
    pub repo_path: String,

    /// Branch checked out by default
    #[serde(default)]
    pub branch: String,
}

impl SourceRepo {
    /// Creates a source repository reference
    pub fn new(repo_path: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            repo_path: repo_path.into(),
            branch: branch.into(),
        }
    }
}

/// Timer trigger for the job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTrigger {
    /// When true the trigger is ignored
    #[serde(default)]
    pub skipped: bool,

    /// Schedule in the engine's cron dialect
    #[serde(default)]
    pub strategy: String,
}

impl PeriodTrigger {
    /// Creates an active trigger with the given schedule
    pub fn schedule(strategy: impl Into<String>) -> Self {
        Self {
            skipped: false,
            strategy: strategy.into(),
        }
    }

    /// Creates a skipped trigger
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            strategy: String::new(),
        }
    }
}

/// Kind of project a pipeline builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Maven project driven by a root pom
    Maven,
    /// Gradle project
    Gradle,
    /// Raw commands run through a POSIX shell
    Shell,
    /// Raw commands run through the Windows batch shell
    Batch,
}

impl ProjectType {
    /// Returns the wire name of the project type
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Maven => "maven",
            Self::Gradle => "gradle",
            Self::Shell => "shell",
            Self::Batch => "batch",
        }
    }

    /// Returns true for the command-driven project types
    pub fn is_script(self) -> bool {
        matches!(self, Self::Shell | Self::Batch)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maven" => Ok(Self::Maven),
            "gradle" => Ok(Self::Gradle),
            "shell" => Ok(Self::Shell),
            "batch" => Ok(Self::Batch),
            other => Err(other.to_string()),
        }
    }
}

/// Project configuration, one variant per project family
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProjectConfig {
    /// Maven configuration
    Maven(MavenConfig),
    /// Gradle configuration
    Gradle(GradleConfig),
    /// Shell or batch configuration
    Script(ScriptConfig),
}

impl ProjectConfig {
    /// Returns the name of the configuration variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Maven(_) => "maven",
            Self::Gradle(_) => "gradle",
            Self::Script(_) => "script",
        }
    }

    /// Returns true if this configuration belongs to the given project type
    pub fn fits(&self, project_type: ProjectType) -> bool {
        matches!(
            (self, project_type),
            (Self::Maven(_), ProjectType::Maven)
                | (Self::Gradle(_), ProjectType::Gradle)
                | (Self::Script(_), ProjectType::Shell | ProjectType::Batch)
        )
    }
}

/// Maven project configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MavenConfig {
    /// Path of the root pom, relative to the workspace
    #[serde(default)]
    pub root_pom: String,

    /// Extra options appended to every maven invocation
    #[serde(default)]
    pub options: String,

    /// Unit test reporting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_test: Option<TestReport>,
}

/// Gradle project configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradleConfig {
    /// Extra options appended to every gradle invocation
    #[serde(default)]
    pub options: String,

    /// Unit test reporting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_test: Option<TestReport>,
}

/// Location of the junit reports a test stage publishes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    /// Report path or pattern
    #[serde(default)]
    pub test_report_path: String,
}

/// Shell or batch project configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Compile command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile: Option<ScriptCommand>,

    /// Unit test command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_test: Option<ScriptUnitTest>,

    /// Build command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<ScriptCommand>,
}

/// A raw command run by a stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptCommand {
    /// Command text
    #[serde(default)]
    pub command: String,
}

impl ScriptCommand {
    /// Creates a command
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

/// Unit test command with its report location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptUnitTest {
    /// Command text
    #[serde(default)]
    pub command: String,

    /// Report path or pattern, empty when nothing is published
    #[serde(default)]
    pub test_report_path: String,
}

/// Logical pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Compile the sources
    Compile,
    /// Run the unit tests
    UnitTest,
    /// Package the build output
    Build,
    /// Deploy the package
    Deploy,
}

impl Stage {
    /// Returns the wire name used in the runtime phase list
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::UnitTest => "unit_test",
            Self::Build => "build",
            Self::Deploy => "deploy",
        }
    }

    /// Returns the name of the script function implementing the stage
    pub fn function_name(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::UnitTest => "unitTest",
            Self::Build => "build",
            Self::Deploy => "deploy",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maven_spec() -> PipelineSpec {
        PipelineSpec::new(
            "p1",
            "jdk1.8",
            SourceRepo::new("git@x/y.git", "master"),
            ProjectConfig::Maven(MavenConfig {
                root_pom: "pom.xml".to_string(),
                ..Default::default()
            }),
            ProjectType::Maven,
        )
    }

    #[test]
    fn test_perform_phases_keeps_selection_order() {
        let spec = maven_spec().with_stages([Stage::Build, Stage::Compile]);
        assert_eq!(spec.perform_phases(), "build,compile");
    }

    #[test]
    fn test_perform_phases_drops_repeats() {
        let spec = maven_spec().with_stages([Stage::UnitTest, Stage::Build, Stage::UnitTest]);
        assert_eq!(spec.perform_phases(), "unit_test,build");
    }

    #[test]
    fn test_perform_phases_empty() {
        assert_eq!(maven_spec().perform_phases(), "");
    }

    #[test]
    fn test_active_trigger() {
        let spec = maven_spec().with_period_trigger(PeriodTrigger::schedule("H 2 * * *"));
        assert_eq!(spec.active_trigger(), Some("H 2 * * *"));

        let spec = maven_spec().with_period_trigger(PeriodTrigger::skipped());
        assert_eq!(spec.active_trigger(), None);
    }

    #[test]
    fn test_project_config_fits() {
        let script = ProjectConfig::Script(ScriptConfig::default());
        assert!(script.fits(ProjectType::Shell));
        assert!(script.fits(ProjectType::Batch));
        assert!(!script.fits(ProjectType::Maven));
        assert!(!ProjectConfig::Gradle(GradleConfig::default()).fits(ProjectType::Maven));
    }

    #[test]
    fn test_stage_serialize() {
        let json = serde_json::to_string(&Stage::UnitTest).unwrap();
        assert_eq!(json, r#""unit_test""#);
        let stage: Stage = serde_json::from_str(r#""deploy""#).unwrap();
        assert_eq!(stage, Stage::Deploy);
    }

    #[test]
    fn test_project_type_from_str() {
        assert_eq!("batch".parse::<ProjectType>(), Ok(ProjectType::Batch));
        assert_eq!("ant".parse::<ProjectType>(), Err("ant".to_string()));
    }

    #[test]
    fn test_stage_names_by_value() {
        let stages = [Stage::Compile, Stage::UnitTest, Stage::Build, Stage::Deploy];
        assert_eq!(stages.map(Stage::as_str), ["compile", "unit_test", "build", "deploy"]);
        assert_eq!(
            stages.map(Stage::function_name),
            ["compile", "unitTest", "build", "deploy"]
        );
    }

    #[test]
    fn test_project_type_by_value() {
        let types = [ProjectType::Maven, ProjectType::Gradle, ProjectType::Shell, ProjectType::Batch];
        assert_eq!(types.map(ProjectType::as_str), ["maven", "gradle", "shell", "batch"]);
        assert_eq!(types.map(ProjectType::is_script), [false, false, true, true]);
    }
}
