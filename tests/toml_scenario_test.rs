use anyhow::Result;
use tempfile::TempDir;
use titration_sim::core::export::ReportExporter;
use titration_sim::domain::model::Verdict;
use titration_sim::domain::ports::{ConfigProvider, Storage};
use titration_sim::utils::validation::Validate;
use titration_sim::{LocalStorage, TitrationError, TitrationSimulation, TomlConfig};

fn write_scenario(dir: &TempDir, name: &str, content: &str) -> Result<String> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path.to_str().unwrap().to_string())
}

/// Scenario file with a custom indicator, exported to CSV and JSON
#[test]
fn test_scenario_with_custom_indicator_and_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().join("out");
    let normalized_output = output_path.to_str().unwrap().replace('\\', "/");

    let content = format!(
        r##"
[scenario]
name = "acetic-acid-thymol-blue"
description = "Weak acid against strong base"

[titration]
acid = "Weak acid (CH3COOH)"
base = "naoh"
indicator = "thymol-blue"
acid_concentration = 0.1
acid_volume = 25.0
base_concentration = 0.1
titrant_volume = 25.0

[output]
output_path = "{}"
formats = ["csv", "json"]

[output.filenames]
json = "acetic.json"

[[catalog.indicators]]
key = "thymol-blue"
name = "Thymol blue"
range = [8.0, 9.6]
acid = "#FFFF00"
mid = "#00FF00"
base = "#0000FF"
"##,
        normalized_output
    );
    let config_path = write_scenario(&temp_dir, "scenario.toml", &content)?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;

    let simulation = TitrationSimulation::new(config.build_catalog()?);
    let request = simulation.request_from(&config)?;
    let report = simulation.run(&request)?;

    assert_eq!(report.indicator.name, "Thymol blue");
    assert_eq!(report.verdict, Verdict::Suitable);
    assert_eq!(report.color.to_string(), "#00FF00");
    assert!(report
        .suitable_indicators
        .contains(&"Phenolphthalein".to_string()));

    let storage = LocalStorage::new(normalized_output.clone());
    let (csv_name, json_name) = config.filenames();
    let written = ReportExporter::new(storage.clone())
        .with_filenames(csv_name, json_name)
        .export(&report, config.output_formats())?;
    assert_eq!(written, vec!["curve.csv".to_string(), "acetic.json".to_string()]);

    let csv_text = String::from_utf8(storage.read_file("curve.csv")?)?;
    let mut lines = csv_text.lines();
    assert_eq!(lines.next(), Some("volume_ml,ph"));
    // first sample (0 mL) has no defined buffer pH and is skipped
    assert!(lines.next().unwrap().starts_with("1.0,"));
    assert_eq!(csv_text.lines().count(), 50);

    let report_json: serde_json::Value = serde_json::from_slice(&storage.read_file("acetic.json")?)?;
    assert_eq!(report_json["curve"]["skipped"][0]["volume"], 0.0);
    assert_eq!(report_json["verdict"]["verdict"], "suitable");
    assert_eq!(report_json["params"]["acid"]["strength"]["class"], "weak");
    Ok(())
}

#[test]
fn test_scenario_abort_policy_surfaces_domain_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_scenario(
        &temp_dir,
        "abort.toml",
        r#"
[scenario]
name = "abort-on-domain-error"

[titration]
acid = "ch3cooh"
base = "naoh"
indicator = "phenolphthalein"
acid_concentration = 0.1
acid_volume = 10.0
base_concentration = 0.1

[sampling]
on_domain_error = "abort"
"#,
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;

    let simulation = TitrationSimulation::new(config.build_catalog()?);
    let request = simulation.request_from(&config)?;
    let err = simulation.run(&request).unwrap_err();

    assert!(matches!(err, TitrationError::DomainError { volume, .. } if volume == 0.0));
    assert_eq!(
        err.severity(),
        titration_sim::utils::error::ErrorSeverity::Medium
    );
    Ok(())
}

#[test]
fn test_scenario_with_unknown_base() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[scenario]
name = "unknown-base"

[titration]
acid = "hcl"
base = "koh"
indicator = "methyl-orange"
acid_concentration = 0.1
acid_volume = 25.0
base_concentration = 0.1
"#,
    )?;
    config.validate()?;

    let simulation = TitrationSimulation::new(config.build_catalog()?);
    let err = simulation.request_from(&config).unwrap_err();
    assert!(matches!(err, TitrationError::UnknownReagent { .. }));
    Ok(())
}

#[test]
fn test_missing_scenario_file() {
    let result = TomlConfig::from_file("/definitely/not/here/titration.toml");
    assert!(matches!(result, Err(TitrationError::IoError(_))));
}
