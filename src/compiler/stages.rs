//! Per-project stage generators
//!
//! Each project family renders its compile, unit test and build stages from
//! its own configuration. [`ProjectStages`] is the closed set of generators;
//! it is built once per compilation from an already validated specification.

use super::template::Template;
use super::templates;
use crate::pipeline::{
    GradleConfig, MavenConfig, PipelineSpec, ProjectConfig, ProjectType, ScriptConfig, Stage,
    TemplateError, ValidationError,
};

/// Report location used when a maven project does not name one
pub const MAVEN_REPORT_PATH: &str = "target/surefire-reports";

/// Report pattern used when a gradle project does not name one
pub const GRADLE_REPORT_PATH: &str = "build/test-results/test/*.xml";

/// Script text implementing one stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFragment {
    /// Stage the fragment implements
    pub stage: Stage,
    /// Generated script text
    pub text: String,
}

impl StageFragment {
    fn render(
        stage: Stage,
        template: Template,
        bindings: &[(&str, &str)],
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            stage,
            text: template.render(bindings)?,
        })
    }
}

/// Renders the stages a project family supports
#[allow(clippy::missing_errors_doc)]
pub trait StageGenerator {
    /// Renders the compile stage function
    fn compile_stage(&self) -> Result<StageFragment, TemplateError>;

    /// Renders the unit test stage function
    fn unit_test_stage(&self) -> Result<StageFragment, TemplateError>;

    /// Renders the build stage function
    fn build_stage(&self) -> Result<StageFragment, TemplateError>;

    /// Helper definitions emitted once before any stage function
    fn preamble(&self) -> Option<&'static str> {
        None
    }

    /// Keyword the script uses to invoke shell commands
    fn shell(&self) -> ShellStep {
        ShellStep::Sh
    }

    /// Renders the function for `stage`, or `None` for stages without a generator
    fn generate(&self, stage: Stage) -> Option<Result<StageFragment, TemplateError>> {
        match stage {
            Stage::Compile => Some(self.compile_stage()),
            Stage::UnitTest => Some(self.unit_test_stage()),
            Stage::Build => Some(self.build_stage()),
            Stage::Deploy => None,
        }
    }
}

/// Shell invocation keyword of the generated script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStep {
    /// POSIX shell step
    Sh,
    /// Windows batch step
    Bat,
}

impl ShellStep {
    /// Picks the keyword for a project type
    #[must_use]
    pub fn for_project(project_type: ProjectType) -> Self {
        match project_type {
            ProjectType::Batch => Self::Bat,
            ProjectType::Maven | ProjectType::Gradle | ProjectType::Shell => Self::Sh,
        }
    }

    /// Returns the keyword
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Sh => "sh",
            Self::Bat => "bat",
        }
    }
}

/// Maven stages
#[derive(Debug, Clone, Copy)]
pub struct MavenStages<'a> {
    config: &'a MavenConfig,
}

impl<'a> MavenStages<'a> {
    /// Creates the generator
    #[must_use]
    pub fn new(config: &'a MavenConfig) -> Self {
        Self { config }
    }

    fn report_path(&self) -> &str {
        report_path_or(self.config.unit_test.as_ref(), MAVEN_REPORT_PATH)
    }
}

impl StageGenerator for MavenStages<'_> {
    fn compile_stage(&self) -> Result<StageFragment, TemplateError> {
        StageFragment::render(
            Stage::Compile,
            templates::MAVEN_COMPILE,
            &[
                ("root_pom", self.config.root_pom.as_str()),
                ("options", self.config.options.as_str()),
            ],
        )
    }

    fn unit_test_stage(&self) -> Result<StageFragment, TemplateError> {
        StageFragment::render(
            Stage::UnitTest,
            templates::MAVEN_UNIT_TEST,
            &[
                ("root_pom", self.config.root_pom.as_str()),
                ("options", self.config.options.as_str()),
                ("test_report_path", self.report_path()),
            ],
        )
    }

    fn build_stage(&self) -> Result<StageFragment, TemplateError> {
        StageFragment::render(
            Stage::Build,
            templates::MAVEN_BUILD,
            &[
                ("root_pom", self.config.root_pom.as_str()),
                ("options", self.config.options.as_str()),
            ],
        )
    }

    fn preamble(&self) -> Option<&'static str> {
        Some(templates::MAVEN_COMMAND)
    }
}

/// Gradle stages
#[derive(Debug, Clone, Copy)]
pub struct GradleStages<'a> {
    config: &'a GradleConfig,
}

impl<'a> GradleStages<'a> {
    /// Creates the generator
    #[must_use]
    pub fn new(config: &'a GradleConfig) -> Self {
        Self { config }
    }
}

impl StageGenerator for GradleStages<'_> {
    fn compile_stage(&self) -> Result<StageFragment, TemplateError> {
        StageFragment::render(
            Stage::Compile,
            templates::GRADLE_COMPILE,
            &[("options", self.config.options.as_str())],
        )
    }

    fn unit_test_stage(&self) -> Result<StageFragment, TemplateError> {
        StageFragment::render(
            Stage::UnitTest,
            templates::GRADLE_UNIT_TEST,
            &[
                ("options", self.config.options.as_str()),
                (
                    "test_report_path",
                    report_path_or(self.config.unit_test.as_ref(), GRADLE_REPORT_PATH),
                ),
            ],
        )
    }

    fn build_stage(&self) -> Result<StageFragment, TemplateError> {
        StageFragment::render(
            Stage::Build,
            templates::GRADLE_BUILD,
            &[("options", self.config.options.as_str())],
        )
    }
}

/// Shell and batch stages running raw commands
#[derive(Debug, Clone, Copy)]
pub struct ScriptStages<'a> {
    config: &'a ScriptConfig,
    shell: ShellStep,
}

impl<'a> ScriptStages<'a> {
    /// Creates the generator invoking commands through `shell`
    #[must_use]
    pub fn new(config: &'a ScriptConfig, shell: ShellStep) -> Self {
        Self { config, shell }
    }
}

impl StageGenerator for ScriptStages<'_> {
    fn compile_stage(&self) -> Result<StageFragment, TemplateError> {
        let command = self
            .config
            .compile
            .as_ref()
            .map_or("", |compile| compile.command.as_str());
        StageFragment::render(
            Stage::Compile,
            templates::SCRIPT_COMPILE,
            &[("shell", self.shell.keyword()), ("command", command)],
        )
    }

    fn unit_test_stage(&self) -> Result<StageFragment, TemplateError> {
        let (command, report) = self
            .config
            .unit_test
            .as_ref()
            .map_or(("", ""), |ut| (ut.command.as_str(), ut.test_report_path.as_str()));
        let publish = if report.is_empty() {
            String::new()
        } else {
            templates::SCRIPT_UNIT_TEST_REPORT.render(&[("test_report_path", report)])?
        };
        StageFragment::render(
            Stage::UnitTest,
            templates::SCRIPT_UNIT_TEST,
            &[
                ("shell", self.shell.keyword()),
                ("command", command),
                ("publish_report", publish.as_str()),
            ],
        )
    }

    fn build_stage(&self) -> Result<StageFragment, TemplateError> {
        let command = self
            .config
            .build
            .as_ref()
            .map_or("", |build| build.command.as_str());
        StageFragment::render(
            Stage::Build,
            templates::SCRIPT_BUILD,
            &[("shell", self.shell.keyword()), ("command", command)],
        )
    }

    fn shell(&self) -> ShellStep {
        self.shell
    }
}

/// The generator matching a specification's project type
#[derive(Debug, Clone, Copy)]
pub enum ProjectStages<'a> {
    /// Maven project
    Maven(MavenStages<'a>),
    /// Gradle project
    Gradle(GradleStages<'a>),
    /// Shell or batch project
    Script(ScriptStages<'a>),
}

impl<'a> ProjectStages<'a> {
    /// Pairs the project type with its configuration
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ProjectMismatch`] if the configuration
    /// belongs to another project family.
    pub fn for_spec(spec: &'a PipelineSpec) -> Result<Self, ValidationError> {
        match (&spec.project, spec.project_type) {
            (ProjectConfig::Maven(config), ProjectType::Maven) => {
                Ok(Self::Maven(MavenStages::new(config)))
            }
            (ProjectConfig::Gradle(config), ProjectType::Gradle) => {
                Ok(Self::Gradle(GradleStages::new(config)))
            }
            (ProjectConfig::Script(config), ProjectType::Shell | ProjectType::Batch) => Ok(
                Self::Script(ScriptStages::new(config, ShellStep::for_project(spec.project_type))),
            ),
            (project, project_type) => Err(ValidationError::ProjectMismatch {
                project_type: project_type.to_string(),
                config: project.kind(),
            }),
        }
    }

    fn inner(&self) -> &dyn StageGenerator {
        match self {
            Self::Maven(stages) => stages,
            Self::Gradle(stages) => stages,
            Self::Script(stages) => stages,
        }
    }
}

impl StageGenerator for ProjectStages<'_> {
    fn compile_stage(&self) -> Result<StageFragment, TemplateError> {
        self.inner().compile_stage()
    }

    fn unit_test_stage(&self) -> Result<StageFragment, TemplateError> {
        self.inner().unit_test_stage()
    }

    fn build_stage(&self) -> Result<StageFragment, TemplateError> {
        self.inner().build_stage()
    }

    fn preamble(&self) -> Option<&'static str> {
        self.inner().preamble()
    }

    fn shell(&self) -> ShellStep {
        self.inner().shell()
    }
}

fn report_path_or<'a>(
    report: Option<&'a crate::pipeline::TestReport>,
    default: &'static str,
) -> &'a str {
    report
        .map(|report| report.test_report_path.as_str())
        .filter(|path| !path.is_empty())
        .unwrap_or(default)
}
