use std::fs;
use std::path::{Path, PathBuf};

use rgen::config::RConfig;
use rgen::diagnostics::SkipReason;
use rgen::naming::is_java_name;
use rgen::{ApiError, RGenerator};
use tempfile::TempDir;

use super::{without_header, write_file};

fn base_config(root: &Path) -> RConfig {
    RConfig {
        package_name: "com.example".to_string(),
        resources_dir: root.join("resources"),
        output_dir: root.join("out"),
        ..Default::default()
    }
}

fn generate(config: RConfig) -> (String, PathBuf) {
    let report = RGenerator::new(config).generate().unwrap();
    let source = fs::read_to_string(&report.output_file).unwrap();
    (source, report.output_file)
}

#[test]
fn properties_keys_and_prefixed_path_field() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "resources/my.properties", "key=value\n");

    let config = RConfig {
        enable_properties: true,
        ..base_config(temp.path())
    };
    let (source, path) = generate(config);

    assert_eq!(path, temp.path().join("out/com/example/R.java"));
    assert!(source.starts_with("// Generated at "));
    assert!(source.contains("package com.example;\n"));
    assert!(source.contains("public final class R {"));
    assert!(source.contains("  private R() {\n  }\n"));
    assert!(source.contains("public static final String key = \"key\";"));
    assert!(source.contains("public static final String _my = \"/my.properties\";"));
}

#[test]
fn uppercase_fields_and_lowercase_class() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "resources/my.properties", "key=value\n");

    let config = RConfig {
        class_name: "R2".to_string(),
        uppercase_fields: true,
        lowercase_classes: true,
        enable_properties: true,
        ..base_config(temp.path())
    };
    let (source, path) = generate(config);

    assert!(path.ends_with("com/example/r2.java"));
    assert!(source.contains("public final class r2 {"));
    assert!(source.contains("public static final String KEY = \"key\";"));
    assert!(source.contains("public static final String _MY = \"/my.properties\";"));
}

#[test]
fn css_class_and_id_selectors() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "resources/style.css",
        ".foo { color: red; }\n#bar { }\n",
    );

    let config = RConfig {
        enable_css: true,
        ..base_config(temp.path())
    };
    let (source, _) = generate(config);

    assert!(source.contains("public static final String foo = \"foo\";"));
    assert!(source.contains("public static final String bar = \"bar\";"));
    assert!(source.contains("public static final String _style = \"/style.css\";"));
}

#[test]
fn json_top_level_keys_only_for_scalar_arrays() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "resources/data.json", r#"{"a": 1, "b": [1, 2]}"#);

    let config = RConfig {
        enable_json: true,
        ..base_config(temp.path())
    };
    let report = RGenerator::new(config).generate().unwrap();
    let source = fs::read_to_string(&report.output_file).unwrap();

    assert!(source.contains("public static final String a = \"a\";"));
    assert!(source.contains("public static final String b = \"b\";"));
    assert!(source.contains("public static final String _data = \"/data.json\";"));
    assert_eq!(report.field_count, 3);
}

#[test]
fn excluded_paths_produce_nothing() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "resources/keep.txt", "");
    write_file(temp.path(), "resources/secret.txt", "");
    write_file(temp.path(), "resources/drafts/inner.txt", "");

    let mut config = base_config(temp.path());
    config.exclusions = vec![
        temp.path().join("resources/secret.txt"),
        temp.path().join("resources/drafts"),
    ];
    let (source, _) = generate(config);

    assert!(source.contains(" keep = \"/keep.txt\";"));
    assert!(!source.contains("secret"));
    assert!(!source.contains("drafts"));
    assert!(!source.contains("inner"));
}

#[test]
fn nesting_mirrors_directories() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "resources/images/icons/add.png", "");
    write_file(temp.path(), "resources/images/logo.png", "");
    write_file(temp.path(), "resources/-/lost.png", "");

    let report = RGenerator::new(base_config(temp.path())).generate().unwrap();
    let source = fs::read_to_string(&report.output_file).unwrap();

    assert!(source.contains("  public static final class images {\n    private images() {\n    }\n"));
    assert!(source.contains("    public static final class icons {"));
    assert!(source.contains("      public static final String add = \"/images/icons/add.png\";"));
    assert!(source.contains("    public static final String logo = \"/images/logo.png\";"));
    assert!(!source.contains("lost"));
    assert_eq!(report.class_count, 3);
    assert!(report
        .skipped
        .iter()
        .any(|s| s.name == "-" && s.reason == SkipReason::Unsanitizable));
}

#[test]
fn every_field_name_is_a_unique_identifier() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "resources/strings.properties", "a-b=1\na_b=2\nclass=3\n1st=4\n_=5\n");
    write_file(temp.path(), "resources/a b.txt", "");
    write_file(temp.path(), "resources/a-b.png", "");

    let config = RConfig {
        enable_properties: true,
        ..base_config(temp.path())
    };
    let (source, _) = generate(config);

    let names: Vec<&str> = source
        .lines()
        .filter_map(|line| line.trim().strip_prefix("public static final String "))
        .filter_map(|rest| rest.split(' ').next())
        .collect();
    assert!(!names.is_empty());
    for name in &names {
        assert!(is_java_name(name), "invalid identifier {}", name);
    }
    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
    assert!(names.contains(&"_class"));
    assert!(names.contains(&"_1st"));
}

#[test]
fn repeated_runs_differ_only_in_header() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "resources/z.properties", "zeta=1\nalpha=2\n");
    write_file(temp.path(), "resources/b/c.txt", "");
    write_file(temp.path(), "resources/a.txt", "");

    let config = RConfig {
        enable_properties: true,
        ..base_config(temp.path())
    };
    let (first, _) = generate(config.clone());
    let (second, _) = generate(config);
    assert_eq!(without_header(&first), without_header(&second));
}

#[test]
fn stale_output_is_removed() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "resources/a.txt", "");
    write_file(temp.path(), "out/org/old/R.java", "stale");

    generate(base_config(temp.path()));
    assert!(!temp.path().join("out/org").exists());
}

#[test]
fn failed_run_keeps_previous_output() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "resources/data.json", r#"{"ok": true}"#);
    let config = RConfig {
        enable_json: true,
        ..base_config(temp.path())
    };
    let (before, path) = generate(config.clone());

    write_file(temp.path(), "resources/data.json", "{ not json");
    let err = RGenerator::new(config).generate().unwrap_err();
    assert!(matches!(err, ApiError::ParseError { .. }));
    assert!(err.to_string().contains("data.json"));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn missing_resources_dir_is_config_error() {
    let temp = TempDir::new().unwrap();
    let err = RGenerator::new(base_config(temp.path())).generate().unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn resource_bundle_files_share_one_class() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "resources/i18n/messages_en.properties", "hello=Hello\n");
    write_file(temp.path(), "resources/i18n/messages_de.properties", "hello=Hallo\nbye=Tschuess\n");

    let mut config = RConfig {
        enable_properties: true,
        ..base_config(temp.path())
    };
    config.properties.write_resource_bundle = true;
    let (source, _) = generate(config);

    assert!(source.contains("    public static final class messages {"));
    assert!(source.contains("      public static final String hello = \"hello\";"));
    assert!(source.contains("      public static final String bye = \"bye\";"));
    assert!(source.contains("    public static final String _messages_de = \"/i18n/messages_de.properties\";"));
    assert!(source.contains("    public static final String _messages_en = \"/i18n/messages_en.properties\";"));
}
