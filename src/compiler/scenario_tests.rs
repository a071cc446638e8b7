//! End-to-end compilation tests
//!
//! Each test drives the public compile entry point and inspects the final
//! job document.

use super::*;
use crate::pipeline::{
    GradleConfig, MavenConfig, PeriodTrigger, ProjectConfig, ProjectType, ScriptCommand,
    ScriptConfig, ScriptUnitTest, SourceRepo, Stage, TestReport,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn compiler() -> Compiler {
    Compiler::new(ToolchainTable::default(), "jenkins-credential")
}

fn scenario_a() -> PipelineSpec {
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
    .with_stages([Stage::Compile, Stage::Build])
}

fn script_config() -> ScriptConfig {
    ScriptConfig {
        compile: Some(ScriptCommand::new("./configure && make")),
        unit_test: Some(ScriptUnitTest {
            command: "make test".to_string(),
            test_report_path: "out/junit.xml".to_string(),
        }),
        build: Some(ScriptCommand::new("make package")),
    }
}

fn script_spec(project_type: ProjectType, stages: &[Stage]) -> PipelineSpec {
    PipelineSpec::new(
        "scripted",
        "jdk1.7",
        SourceRepo::new("https://example.com/tools.git", "main"),
        ProjectConfig::Script(script_config()),
        project_type,
    )
    .with_stages(stages.iter().copied())
}

#[test]
fn test_scenario_a_maven_compile_and_build() {
    let compiler = compiler();
    let spec = scenario_a();
    assert!(compiler.validator().is_valid(&spec));

    let doc = compiler.compile(&spec).unwrap();
    let text = doc.as_str();

    assert!(text.contains("if (performPhases.contains(\"compile\")) {"));
    assert!(text.contains("def compile() {"));
    assert!(text.contains("if (performPhases.contains(\"build\")) {"));
    assert!(text.contains("def build() {"));
    assert!(!text.contains("performPhases.contains(\"unit_test\")"));
    assert!(!text.contains("def unitTest() {"));
    assert_eq!(text.matches(templates::SKIPPED).count(), 1);
    assert!(text.contains("  <triggers/>\n"));
    assert!(text.contains("<defaultValue>compile,build</defaultValue>"));
    assert!(text.contains("<defaultValue>master</defaultValue>"));
    assert!(text.contains("credentialsId: 'jenkins-credential'"));
}

#[test]
fn test_scenario_b_unknown_toolchain() {
    let mut spec = scenario_a();
    spec.toolchain = "1.7".to_string();

    let compiler = compiler();
    assert!(!compiler.validator().is_valid(&spec));
    assert_eq!(
        compiler.compile(&spec),
        Err(CompileError::Validation(ValidationError::UnknownToolchain {
            version: "1.7".to_string()
        }))
    );
}

#[test]
fn test_scenario_c_script_without_build_command() {
    let mut spec = script_spec(ProjectType::Shell, &[Stage::Compile]);
    spec.project = ProjectConfig::Script(ScriptConfig {
        compile: Some(ScriptCommand::new("make")),
        unit_test: None,
        build: None,
    });

    assert!(!compiler().validator().is_valid(&spec));
    assert!(matches!(
        compiler().compile(&spec),
        Err(CompileError::Validation(ValidationError::MissingScriptCommand { stage: "build" }))
    ));
}

#[test]
fn test_scenario_d_blank_trigger_strategy() {
    let spec = scenario_a().with_period_trigger(PeriodTrigger {
        skipped: false,
        strategy: String::new(),
    });
    assert!(!compiler().validator().is_valid(&spec));
    assert_eq!(
        compiler().compile(&spec),
        Err(CompileError::Validation(ValidationError::EmptyTriggerStrategy))
    );
}

#[test]
fn test_scenario_e_gradle_unit_test_only() {
    let spec = PipelineSpec::new(
        "gradle-ut",
        "jdk1.8",
        SourceRepo::new("git@x/app.git", "develop"),
        ProjectConfig::Gradle(GradleConfig {
            options: "--offline -Penv=ci".to_string(),
            unit_test: Some(TestReport {
                test_report_path: "build/reports/**/*.xml".to_string(),
            }),
        }),
        ProjectType::Gradle,
    )
    .with_stages([Stage::UnitTest]);

    let doc = compiler().compile(&spec).unwrap();
    let text = doc.as_str();

    assert!(text.contains("sh \"gradle clean test --offline -Penv=ci\""));
    assert!(text.contains("junit 'build/reports/**/*.xml'"));
    assert!(text.contains("// Compile Stage\n                    // Skipped"));
    assert!(text.contains("// Package Stage\n                    // Skipped"));
    assert!(!text.contains("def compile() {"));
    assert!(!text.contains("def build() {"));
}

#[test]
fn test_shell_unit_test_without_command_compiles() {
    let mut spec = script_spec(ProjectType::Shell, &[Stage::UnitTest]);
    spec.project = ProjectConfig::Script(ScriptConfig {
        unit_test: None,
        ..script_config()
    });

    let compiler = compiler();
    assert!(compiler.validator().is_valid(&spec));
    let text = compiler.compile(&spec).unwrap().into_string();

    assert!(text.contains("if (performPhases.contains(\"unit_test\")) {"));
    assert!(text.contains("def unitTest() {"));
    assert!(text.contains("sh "));
    assert!(!text.contains("junit"));
    assert!(text.contains("<defaultValue>unit_test</defaultValue>"));
}

#[test]
fn test_active_trigger_in_document() {
    let spec = scenario_a().with_period_trigger(PeriodTrigger::schedule("H H(0-7) * * *"));
    let doc = compiler().compile(&spec).unwrap();
    assert!(doc.as_str().contains("<spec>H H(0-7) * * *</spec>"));
    assert!(!doc.as_str().contains("<triggers/>"));
}

#[test]
fn test_batch_document_uses_bat() {
    let spec = script_spec(ProjectType::Batch, &[Stage::Compile, Stage::UnitTest, Stage::Build]);
    let text = compiler().compile(&spec).unwrap().into_string();

    assert_eq!(text.matches("bat '''").count(), 3);
    assert!(!text.contains("sh '''"));
    assert!(text.contains("bat '''./configure &amp;&amp; make'''"));
}

#[test]
fn test_shell_document_keeps_sh() {
    let spec = script_spec(ProjectType::Shell, &[Stage::Compile, Stage::UnitTest, Stage::Build]);
    let text = compiler().compile(&spec).unwrap().into_string();

    assert_eq!(text.matches("sh '''").count(), 3);
    assert!(!text.contains("bat '''"));
    assert!(text.contains("junit 'out/junit.xml'"));
}

#[test]
fn test_no_placeholder_survives() {
    for spec in [
        scenario_a(),
        script_spec(ProjectType::Batch, &[Stage::UnitTest, Stage::Deploy]),
        scenario_a().with_period_trigger(PeriodTrigger::schedule("@daily")),
    ] {
        let doc = compiler().compile(&spec).unwrap();
        assert!(!doc.as_str().contains("{{"), "{doc}");
    }
}

#[test]
fn test_document_is_well_formed_xml_text() {
    let mut spec = script_spec(ProjectType::Shell, &[Stage::Compile]);
    spec.repo = Some(SourceRepo::new("https://example.com/a.git", "feature/<x>&y"));
    let text = compiler().compile(&spec).unwrap().into_string();

    assert!(text.contains("<defaultValue>feature/&lt;x&gt;&amp;y</defaultValue>"));
    assert!(text.contains("branches: [[name: 'feature/&lt;x&gt;&amp;y']]"));
}

#[test]
fn test_mismatched_project_is_validation_error() {
    let mut spec = scenario_a();
    spec.project_type = ProjectType::Shell;
    assert!(matches!(
        compiler().compile(&spec),
        Err(CompileError::Validation(ValidationError::ProjectMismatch { .. }))
    ));
}

#[test]
fn test_injected_toolchain_path() {
    let compiler = Compiler::new(ToolchainTable::new([("jdk1.8", "/opt/zulu8")]), "cred");
    let doc = compiler.compile(&scenario_a()).unwrap();
    assert!(doc.as_str().contains("javaHome = \"/opt/zulu8\""));
}

fn stage_set() -> impl Strategy<Value = Vec<Stage>> {
    prop::collection::vec(
        prop_oneof![
            Just(Stage::Compile),
            Just(Stage::UnitTest),
            Just(Stage::Build),
            Just(Stage::Deploy),
        ],
        0..6,
    )
}

fn project_type() -> impl Strategy<Value = ProjectType> {
    prop_oneof![
        Just(ProjectType::Maven),
        Just(ProjectType::Gradle),
        Just(ProjectType::Shell),
        Just(ProjectType::Batch),
    ]
}

fn valid_spec(project_type: ProjectType, stages: Vec<Stage>, branch: String) -> PipelineSpec {
    let project = match project_type {
        ProjectType::Maven => ProjectConfig::Maven(MavenConfig {
            root_pom: "pom.xml".to_string(),
            options: "-q".to_string(),
            unit_test: None,
        }),
        ProjectType::Gradle => ProjectConfig::Gradle(GradleConfig::default()),
        ProjectType::Shell | ProjectType::Batch => ProjectConfig::Script(script_config()),
    };
    PipelineSpec::new(
        "generated",
        "jdk1.6",
        SourceRepo::new("git@host:org/repo.git", branch),
        project,
        project_type,
    )
    .with_stages(stages)
}

proptest! {
    #[test]
    fn prop_valid_specs_compile(
        project_type in project_type(),
        stages in stage_set(),
        branch in "[a-z][a-z0-9/_-]{0,12}",
    ) {
        let spec = valid_spec(project_type, stages, branch);
        let compiler = compiler();
        prop_assert!(compiler.validator().is_valid(&spec));
        let doc = compiler.compile(&spec).unwrap();
        prop_assert!(!doc.as_str().is_empty());
    }

    #[test]
    fn prop_compilation_is_deterministic(
        project_type in project_type(),
        stages in stage_set(),
        branch in "[a-z][a-z0-9/_-]{0,12}",
    ) {
        let spec = valid_spec(project_type, stages, branch);
        let first = compiler().compile(&spec).unwrap();
        let second = compiler().compile(&spec.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_stage_guard_xor_skip(
        project_type in project_type(),
        stages in stage_set(),
    ) {
        let spec = valid_spec(project_type, stages, "main".to_string());
        let text = compiler().compile(&spec).unwrap().into_string();
        let selected = GENERATED_STAGES.iter().filter(|stage| spec.selects(**stage)).count();

        for stage in GENERATED_STAGES {
            let guard = format!("performPhases.contains(\"{}\")", stage.as_str());
            let body = format!("def {}() {{", stage.function_name());
            prop_assert_eq!(text.contains(&guard), spec.selects(stage));
            prop_assert_eq!(text.contains(&body), spec.selects(stage));
        }
        prop_assert_eq!(
            text.matches(templates::SKIPPED).count(),
            GENERATED_STAGES.len() - selected
        );
    }

    #[test]
    fn prop_missing_repo_fields_rejected(
        project_type in project_type(),
        stages in stage_set(),
        which in 0..3u8,
    ) {
        let mut spec = valid_spec(project_type, stages, "main".to_string());
        match which {
            0 => spec.repo = None,
            1 => spec.repo = Some(SourceRepo::new("", "main")),
            _ => spec.repo = Some(SourceRepo::new("git@host:org/repo.git", "")),
        }
        prop_assert!(!compiler().validator().is_valid(&spec));
        prop_assert!(compiler().compile(&spec).is_err());
    }
}
