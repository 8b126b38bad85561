use clap::{CommandFactory, Parser};
use rgen::tooling::cli::{Cli, CliContext, Commands};
use tempfile::TempDir;

use super::write_file;

fn run(project: &TempDir, args: &[&str]) -> Result<String, rgen::ApiError> {
    let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
    let context = CliContext::new(project.path().to_path_buf(), cli.config.clone())?;
    context.execute(&cli.command)
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["rgen", "r"],
        vec!["rgen", "r", "--css", "--json", "--properties", "--format", "json"],
        vec!["rgen", "r", "--exclude", "a", "--exclude", "b/c", "--uppercase-fields"],
        vec!["rgen", "build-config", "--field", "int:A=1", "--field", "string:B=x"],
        vec!["rgen", "build-config", "--app-version", "1.0", "--debug"],
        vec!["rgen", "sanitize", "a-b", "1abc"],
        vec!["rgen", "config", "--format", "json"],
        vec!["rgen", "--project-dir", "/tmp", "--log-output", "stdout", "config"],
    ];
    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn r_uses_project_file_and_flags() {
    let project = TempDir::new().unwrap();
    write_file(
        project.path(),
        "rgen.toml",
        "[r]\npackage_name = \"com.example\"\nenable_properties = true\n",
    );
    write_file(project.path(), "src/main/resources/app.properties", "title=x\n");
    write_file(project.path(), "src/main/resources/skip/me.txt", "");

    let output = run(
        &project,
        &[
            "rgen",
            "r",
            "--exclude",
            "src/main/resources/skip",
            "--format",
            "json",
        ],
    )
    .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["class_name"], "R");
    assert_eq!(parsed["field_count"], 2);
    assert_eq!(parsed["class_count"], 1);
    assert!(parsed["skipped"].as_array().unwrap().is_empty());
    assert!(parsed["duration_ms"].as_u64().is_some());

    let generated = project
        .path()
        .join("build/generated/r/com/example/R.java");
    let source = std::fs::read_to_string(generated).unwrap();
    assert!(source.contains("public static final String title = \"title\";"));
    assert!(source.contains("public static final String _app = \"/app.properties\";"));
}

#[test]
fn r_without_package_fails() {
    let project = TempDir::new().unwrap();
    write_file(project.path(), "src/main/resources/a.txt", "");
    let err = run(&project, &["rgen", "r"]).unwrap_err();
    assert!(err.to_string().contains("Package name cannot be empty"));
}

#[test]
fn output_dir_over_project_is_refused() {
    let project = TempDir::new().unwrap();
    write_file(project.path(), "src/main/resources/a.txt", "");
    write_file(project.path(), "build.gradle", "plugins {}");

    let err = run(
        &project,
        &["rgen", "r", "--package", "com.example", "--output-dir", "."],
    )
    .unwrap_err();
    assert!(matches!(err, rgen::ApiError::ConfigError(_)));

    let err = run(
        &project,
        &["rgen", "build-config", "--package", "com.example", "--output-dir", "."],
    )
    .unwrap_err();
    assert!(matches!(err, rgen::ApiError::ConfigError(_)));

    assert!(project.path().join("build.gradle").exists());
    assert!(project.path().join("src/main/resources/a.txt").exists());
}

#[test]
fn explicit_config_file_replaces_project_file() {
    let project = TempDir::new().unwrap();
    write_file(project.path(), "rgen.toml", "[r]\nclass_name = \"FromProject\"\n");
    write_file(project.path(), "alt.toml", "[r]\nclass_name = \"FromAlt\"\n");

    let output = run(&project, &["rgen", "--config", "alt.toml", "config", "--format", "json"]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["r"]["class_name"], "FromAlt");
}

#[test]
fn config_prints_toml() {
    let project = TempDir::new().unwrap();
    let output = run(&project, &["rgen", "config"]).unwrap();
    let parsed: toml::Value = toml::from_str(&output).unwrap();
    assert_eq!(parsed["r"]["class_name"].as_str(), Some("R"));
    assert_eq!(
        parsed["build_config"]["class_name"].as_str(),
        Some("BuildConfig")
    );
}

#[test]
fn build_config_with_custom_fields() {
    let project = TempDir::new().unwrap();
    let output = run(
        &project,
        &[
            "rgen",
            "build-config",
            "--package",
            "com.example",
            "--app-name",
            "demo",
            "--field",
            "double:RATIO=0.5",
            "--field",
            "char:SEP=/",
        ],
    )
    .unwrap();
    assert!(output.contains("BuildConfig"));

    let source = std::fs::read_to_string(
        project
            .path()
            .join("build/generated/buildconfig/com/example/BuildConfig.java"),
    )
    .unwrap();
    assert!(source.contains("public static final String NAME = \"demo\";"));
    assert!(source.contains("public static final double RATIO = 0.5;"));
    assert!(source.contains("public static final char SEP = '/';"));
}

#[test]
fn sanitize_text_and_json() {
    let project = TempDir::new().unwrap();
    let output = run(&project, &["rgen", "sanitize", "a--b", "_", "class"]).unwrap();
    assert_eq!(output, "a--b -> a_b\n_ -> <none>\nclass -> _class");

    let output = run(&project, &["rgen", "sanitize", "1abc", "--format", "json"]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed[0]["input"], "1abc");
    assert_eq!(parsed[0]["output"], "_1abc");
}

#[test]
fn sanitize_command_value_matches_enum() {
    let cli = Cli::try_parse_from(["rgen", "sanitize", "x"]).unwrap();
    assert!(matches!(cli.command, Commands::Sanitize { .. }));
}
