//! `jobline compile`, `validate`, `phases` and `toolchains`

use anyhow::{Context, Result};
use jobline::compiler::{Compiler, JobDocument};
use jobline::pipeline::{PipelineSpec, SpecFormat, ToolchainTable, decode_spec};
use std::fs;
use std::path::Path;

/// Compiled job plus the phase list that accompanies it
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub document: JobDocument,
    pub perform_phases: String,
}

/// Reads and decodes a specification file
pub fn load_spec(path: &Path) -> Result<PipelineSpec> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read spec file: {}", path.display()))?;
    decode_spec(&content, SpecFormat::from_path(path))
        .with_context(|| format!("Failed to decode spec file: {}", path.display()))
}

pub fn compile_pipeline(path: &Path, compiler: &Compiler) -> Result<CompileOutput> {
    let spec = load_spec(path)?;
    let document = compiler
        .compile(&spec)
        .with_context(|| format!("Fail to generate pipeline config for {}", spec.name))?;
    Ok(CompileOutput {
        document,
        perform_phases: spec.perform_phases(),
    })
}

/// Checks a specification without generating anything
pub fn validate_pipeline(path: &Path, compiler: &Compiler) -> Result<String> {
    let spec = load_spec(path)?;
    compiler
        .validator()
        .validate(&spec)
        .with_context(|| format!("Pipeline {} is invalid", spec.name))?;
    Ok(format!("Pipeline {} is valid", spec.name))
}

pub fn pipeline_phases(path: &Path) -> Result<String> {
    Ok(load_spec(path)?.perform_phases())
}

/// Formats the toolchain table as `key<TAB>path` lines
pub fn format_toolchains(table: &ToolchainTable) -> String {
    table
        .iter()
        .map(|(key, path)| format!("{key}\t{path}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes `text` to `output`, or stdout when no path is given
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write output to: {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MAVEN_SPEC: &str = r#"{
        "name": "p1",
        "jdk": "jdk1.8",
        "repo": {"repo_path": "git@x/y.git", "branch": "master"},
        "type": "maven",
        "project": {"root_pom": "pom.xml"},
        "stages": ["compile", "build"]
    }"#;

    fn spec_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_compile_pipeline() {
        let file = spec_file(".json", MAVEN_SPEC);
        let output = compile_pipeline(file.path(), &Compiler::default()).unwrap();
        assert_eq!(output.perform_phases, "compile,build");
        assert!(output.document.as_str().contains("<flow-definition"));
    }

    #[test]
    fn test_compile_yaml_spec() {
        let yaml = "name: tools\njdk: jdk1.7\nrepo:\n  repo_path: git@x/tools.git\n  branch: main\ntype: shell\nproject:\n  compile:\n    command: make\n  build:\n    command: make dist\nstages: [compile]\n";
        let file = spec_file(".yaml", yaml);
        let output = compile_pipeline(file.path(), &Compiler::default()).unwrap();
        assert_eq!(output.perform_phases, "compile");
        assert!(output.document.as_str().contains("sh '''make'''"));
    }

    #[test]
    fn test_validate_reports_rule() {
        let file = spec_file(".json", &MAVEN_SPEC.replace("jdk1.8", "1.7"));
        let err = validate_pipeline(file.path(), &Compiler::default()).unwrap_err();
        assert_eq!(err.to_string(), "Pipeline p1 is invalid");
        assert!(format!("{err:#}").contains("1.7"));
    }

    #[test]
    fn test_unknown_project_type() {
        let file = spec_file(".json", &MAVEN_SPEC.replace("\"maven\"", "\"ant\""));
        let err = load_spec(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("ant"));
    }

    #[test]
    fn test_pipeline_phases() {
        let file = spec_file(".json", MAVEN_SPEC);
        assert_eq!(pipeline_phases(file.path()).unwrap(), "compile,build");
    }

    #[test]
    fn test_format_toolchains() {
        let table = ToolchainTable::new([("a", "/opt/a"), ("b", "/opt/b")]);
        assert_eq!(format_toolchains(&table), "a\t/opt/a\nb\t/opt/b");
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.xml");
        write_output("<x/>", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<x/>");
    }
}
