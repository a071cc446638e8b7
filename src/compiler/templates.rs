//! Job definition templates

use super::template::Template;

/// Site marker for a stage that was not selected
pub const SKIPPED: &str = "// Skipped";

/// Site marker for the deploy stage, which has no generator
pub const DEPLOY_UNSUPPORTED: &str = "// Deploy is not supported";

/// Trigger fragment for jobs without a periodic trigger
pub const EMPTY_TRIGGERS: &str = "<triggers/>";

/// Outer pipeline job definition
pub const JOB: Template = Template::new(
    "job",
    r#"<?xml version='1.0' encoding='UTF-8'?>
<flow-definition plugin="workflow-job@2.3">
  <actions/>
  <description>Pipeline to compile, unit test, build and deploy.</description>
  <keepDependencies>false</keepDependencies>
  <properties>
    <hudson.model.ParametersDefinitionProperty>
      <parameterDefinitions>
        <hudson.model.StringParameterDefinition>
          <name>branch</name>
          <description>The source code branch.</description>
          <defaultValue>{{branch}}</defaultValue>
        </hudson.model.StringParameterDefinition>
        <hudson.model.StringParameterDefinition>
          <name>performPhases</name>
          <description>The phases to be performed.</description>
          <defaultValue>{{perform_phases}}</defaultValue>
        </hudson.model.StringParameterDefinition>
      </parameterDefinitions>
    </hudson.model.ParametersDefinitionProperty>
  </properties>
  <definition class="org.jenkinsci.plugins.workflow.cps.CpsFlowDefinition" plugin="workflow-cps@2.9">
    <script>{{script}}</script>
    <sandbox>false</sandbox>
  </definition>
  {{triggers}}
</flow-definition>"#,
);

/// Timer trigger fragment
pub const TRIGGERS: Template = Template::new(
    "triggers",
    r"<triggers>
    <hudson.triggers.TimerTrigger>
      <spec>{{strategy}}</spec>
    </hudson.triggers.TimerTrigger>
  </triggers>",
);

/// Script header: checkout, toolchain environment and one site per stage
pub const SCRIPT: Template = Template::new(
    "script",
    r#"
performPhases = params.performPhases ?: "{{perform_phases}}"
javaHome = "{{toolchain_path}}"

node("{{node_label}}") {
    timestamps {
        catchError {
            timeout(time: 1, unit: 'HOURS') {
                // Checkout the source code
                checkout([$class: 'GitSCM', branches: [[name: '{{branch}}']], userRemoteConfigs: [[credentialsId: '{{credential_id}}', url: '{{repo_path}}']]])
                {{shell}} "git checkout ${params.branch}"

                withEnv(["WORKSPACE=${pwd()}", "PATH+JAVA=${javaHome}/bin", "JAVA_HOME=${javaHome}"]) {
                    // Compile Stage
                    {{compile_stage}}

                    // Unit Test Stage
                    {{unit_test_stage}}

                    // Package Stage
                    {{build_stage}}

                    // Deploy Stage
                    {{deploy_stage}}
                }
            }
        }
    }

    // Archive the workspace
    archiveArtifacts artifacts: '**/*', excludes: '**/*.war, **/*.tar.gz, **/*.tgz, **/*.zip'
}
"#,
);

/// Guarded stage invocation placed at a stage site
pub const STAGE_GUARD: Template = Template::new(
    "stage_guard",
    r#"if (performPhases.contains("{{stage}}")) {
                        {{function}}()
                    }"#,
);

/// Shared maven invocation helper
pub const MAVEN_COMMAND: &str = r#"
def mvn(args) {
    sh "/opt/maven/latest/bin/mvn ${args}"
}
"#;

/// Maven compile stage
pub const MAVEN_COMPILE: Template = Template::new(
    "maven_compile",
    r#"
def compile() {
    stage "Compile"

    mvn("-B -f {{root_pom}} clean install -e -U -DskipTests=true -Dfindbugs.skip=true {{options}}")
}
"#,
);

/// Maven unit test stage
pub const MAVEN_UNIT_TEST: Template = Template::new(
    "maven_unit_test",
    r#"
def unitTest() {
    stage "Unit Test"

    mvn("-B -f {{root_pom}} clean org.jacoco:jacoco-maven-plugin:0.7.2.201409121644:prepare-agent test -Dfindbugs.skip=true {{options}}")

    junit '**/{{test_report_path}}/TEST-*.xml'
}
"#,
);

/// Maven package stage
pub const MAVEN_BUILD: Template = Template::new(
    "maven_build",
    r#"
def build() {
    stage "Build"

    mvn("-B -f {{root_pom}} clean package -e -U -DskipTests=true -Dfindbugs.skip=true {{options}}")
}
"#,
);

/// Gradle compile stage
pub const GRADLE_COMPILE: Template = Template::new(
    "gradle_compile",
    r#"
def compile() {
    stage "Compile"

    sh "gradle clean classes -x test -x check {{options}}"
}
"#,
);

/// Gradle unit test stage
pub const GRADLE_UNIT_TEST: Template = Template::new(
    "gradle_unit_test",
    r#"
def unitTest() {
    stage "Unit Test"

    sh "gradle clean test {{options}}"

    junit '{{test_report_path}}'
}
"#,
);

/// Gradle build stage
pub const GRADLE_BUILD: Template = Template::new(
    "gradle_build",
    r#"
def build() {
    stage "Build"

    sh "gradle clean build {{options}} -x test"
}
"#,
);

/// Shell/batch compile stage
pub const SCRIPT_COMPILE: Template = Template::new(
    "script_compile",
    r#"
def compile() {
    stage "Compile"

    {{shell}} '''{{command}}'''
}
"#,
);

/// Shell/batch unit test stage
pub const SCRIPT_UNIT_TEST: Template = Template::new(
    "script_unit_test",
    r#"
def unitTest() {
    stage "Unit Test"

    {{shell}} '''{{command}}'''{{publish_report}}
}
"#,
);

/// Report publishing step appended to a shell/batch unit test
pub const SCRIPT_UNIT_TEST_REPORT: Template = Template::new(
    "script_unit_test_report",
    "\n\n    junit '{{test_report_path}}'",
);

/// Shell/batch build stage
pub const SCRIPT_BUILD: Template = Template::new(
    "script_build",
    r#"
def build() {
    stage "Build"

    {{shell}} '''{{command}}'''
}
"#,
);
