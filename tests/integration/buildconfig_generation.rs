use std::fs;

use rgen::config::{BuildConfigConfig, CustomField};
use rgen::java::JavaType;
use rgen::{ApiError, BuildConfigGenerator};
use tempfile::TempDir;

fn config(temp: &TempDir) -> BuildConfigConfig {
    BuildConfigConfig {
        package_name: "com.example.app".to_string(),
        output_dir: temp.path().join("out"),
        app_name: "Demo".to_string(),
        group_id: "com.example".to_string(),
        app_version: "2.1.0".to_string(),
        debug: true,
        ..Default::default()
    }
}

#[test]
fn writes_standard_and_custom_fields() {
    let temp = TempDir::new().unwrap();
    let mut cfg = config(&temp);
    cfg.email = Some("dev@example.com".to_string());
    cfg.fields = vec![
        CustomField {
            name: "MAX_RETRIES".to_string(),
            ty: JavaType::Int,
            value: "5".to_string(),
        },
        CustomField {
            name: "TIMEOUT_MS".to_string(),
            ty: JavaType::Long,
            value: "30000".to_string(),
        },
        CustomField {
            name: "MOTD".to_string(),
            ty: JavaType::String,
            value: "say \"hi\"".to_string(),
        },
    ];

    let report = BuildConfigGenerator::new(cfg).generate().unwrap();
    let source = fs::read_to_string(&report.output_file).unwrap();

    assert!(report
        .output_file
        .ends_with("com/example/app/BuildConfig.java"));
    let expected_body = "\
package com.example.app;

public final class BuildConfig {
  private BuildConfig() {
  }

  public static final String NAME = \"Demo\";

  public static final String GROUP = \"com.example\";

  public static final String VERSION = \"2.1.0\";

  public static final boolean DEBUG = true;

  public static final String EMAIL = \"dev@example.com\";

  public static final int MAX_RETRIES = 5;

  public static final long TIMEOUT_MS = 30000L;

  public static final String MOTD = \"say \\\"hi\\\"\";
}
";
    let (header, body) = source.split_once('\n').unwrap();
    assert!(header.starts_with("// Generated at "));
    assert_eq!(body, expected_body);
}

#[test]
fn invalid_custom_value_leaves_output_untouched() {
    let temp = TempDir::new().unwrap();
    let (first, path) = {
        let report = BuildConfigGenerator::new(config(&temp)).generate().unwrap();
        (fs::read_to_string(&report.output_file).unwrap(), report.output_file)
    };

    let mut cfg = config(&temp);
    cfg.fields.push(CustomField {
        name: "RATIO".to_string(),
        ty: JavaType::Float,
        value: "fast".to_string(),
    });
    let err = BuildConfigGenerator::new(cfg).generate().unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
    assert_eq!(fs::read_to_string(path).unwrap(), first);
}

#[test]
fn blank_package_is_rejected() {
    let temp = TempDir::new().unwrap();
    let mut cfg = config(&temp);
    cfg.package_name = String::new();
    let err = BuildConfigGenerator::new(cfg).generate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Configuration error: Package name cannot be empty."
    );
}
