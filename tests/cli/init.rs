use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "sourceLocaleDir",
        "targetLocaleDir",
        "uiSourceGlobs",
        "translationFunctions",
        "namespaceSeparator",
    ] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["sourceLocale"], Value::from("en"));
    assert_eq!(parsed["namespaceSeparator"], Value::from(":"));

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .localeauditrc.json
    Edit .localeauditrc.json to point at your locale directories, then run `locale-audit audit`.

    ----- stderr -----
    ");
    assert!(test.root().join(".localeauditrc.json").exists());

    let content = test.read_file(".localeauditrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".localeauditrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .localeauditrc.json already exists
    ");
    assert_eq!(test.read_file(".localeauditrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    run(test.command().arg("init"))?;

    test.write_file("public/locales/en/common.json", r#"{"title": "Calculator"}"#)?;
    test.write_file("public/locales/ar/common.json", r#"{"title": "حاسبة"}"#)?;
    test.write_file(
        "src/components/App.tsx",
        r#"export function App() { return <h1>{t("title")}</h1>; }"#,
    )?;

    let output = run(test.command().arg("audit"))?;
    assert_eq!(
        output.code,
        Some(0),
        "audit should work with the initialized config. stderr: {}",
        output.stderr
    );
    assert!(output.stdout.contains("\u{2713} common  100%"));
    assert!(output.stdout.contains("No keys missing in ar"));

    Ok(())
}
