use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, run};

const EN_COMMON: &str = r#"{
  "k1": "one", "k2": "two", "k3": "three", "k4": "four", "k5": "five",
  "k6": "six", "k7": "seven", "k8": "eight", "k9": "nine", "k10": "ten"
}"#;

const AR_COMMON: &str = r#"{
  "k1": "واحد", "k2": "اثنان", "k3": "ثلاثة", "k4": "أربعة",
  "k5": "خمسة", "k6": "ستة", "k7": "سبعة", "k8": "ثمانية",
  "extra1": "إضافي", "extra2": "آخر"
}"#;

fn ten_versus_eight_plus_two() -> Result<CliTest> {
    CliTest::with_files(&[
        ("locales/en/common.json", EN_COMMON),
        ("locales/ar/common.json", AR_COMMON),
    ])
}

#[test]
fn test_mismatches_are_reported_with_exit_zero() -> Result<()> {
    let test = ten_versus_eight_plus_two()?;

    assert_cmd_snapshot!(test.audit_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Locale files (en → ar)
      ✘ common   80%  2 missing in ar, 2 missing in en
          missing in ar:
            - k10
            - k9
          missing in en:
            - extra1
            - extra2

    Components (0 using translation keys)
      ✓ every used key exists in ar

    Summary
      locale files: 1 analyzed, 1 with issues, 2 missing in ar, 2 missing in en, 0 structural
      components: 0 with keys, 0 with issues, 0 missing in ar, 0 missing in en, 0 structural
      0 UI files scanned, 0 dynamic keys

    ✘ 2 keys missing in ar

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_missing_source_dir_is_fatal() -> Result<()> {
    let test = CliTest::with_files(&[("locales/ar/common.json", AR_COMMON)])?;
    let _guard = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.audit_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Source locale directory not found: [ROOT]/locales/en
    ");

    Ok(())
}

#[test]
fn test_missing_target_dir_reports_everything_missing() -> Result<()> {
    let test = CliTest::with_files(&[("locales/en/common.json", r#"{"save": "Save"}"#)])?;
    let _guard = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.audit_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Locale files (en → ar)
      ✘ common    0%  1 missing in ar
          missing in ar:
            - save

    Components (0 using translation keys)
      ✓ every used key exists in ar

    Summary
      locale files: 1 analyzed, 1 with issues, 1 missing in ar, 0 missing in en, 0 structural
      components: 0 with keys, 0 with issues, 0 missing in ar, 0 missing in en, 0 structural
      0 UI files scanned, 0 dynamic keys

    ✘ 1 key missing in ar

    ----- stderr -----
     WARN target locale directory not found, every key will be reported missing path=[ROOT]/locales/ar
    ");

    Ok(())
}

#[test]
fn test_malformed_locale_file_is_skipped() -> Result<()> {
    let test = ten_versus_eight_plus_two()?;
    test.write_file("locales/en/calc/health.json", r#"{"bmi": "#)?;
    test.write_file("locales/ar/calc/health.json", r#"{"bmi": "مؤشر"}"#)?;

    let output = run(&mut test.audit_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stderr.contains("skipping unreadable locale file"));
    assert!(output.stderr.contains("health.json"));
    assert!(output.stdout.contains("calc/health     -  failed to load in en"));
    assert!(output.stdout.contains("Files that failed to load (1)"));
    // The rest of the tree is still audited.
    assert!(output.stdout.contains("        - k10"));

    Ok(())
}

#[test]
fn test_component_usages() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en/common.json", r#"{"save": "Save", "cancel": "Cancel"}"#),
        (
            "locales/en/calc/health.json",
            r#"{"bmi": {"title": "BMI", "result": "Result"}}"#,
        ),
        ("locales/ar/common.json", r#"{"save": "حفظ", "cancel": "إلغاء"}"#),
        ("locales/ar/calc/health.json", r#"{"bmi": {"title": "مؤشر"}}"#),
        (
            "src/components/Bmi.tsx",
            r#"
export function Bmi({ kind }) {
  const { t } = useTranslation("calc/health");
  return (
    <div>
      <h2>{t("bmi.title")}</h2>
      <p>{t("bmi.result")}</p>
      <button>{t("common:save")}</button>
      <span>{t(`bmi.${kind}`)}</span>
    </div>
  );
}
"#,
        ),
        (
            "src/components/Plain.tsx",
            "export const Plain = () => <div />;",
        ),
    ])?;

    assert_cmd_snapshot!(test.audit_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Locale files (en → ar)
      ✘ calc/health   50%  1 missing in ar
          missing in ar:
            - bmi.result
      ✓ common       100%

    Components (1 using translation keys)
      largest gaps first:
      ✘ src/components/Bmi.tsx   67%  1 missing in ar
          missing in ar:
            - calc/health:bmi.result

    Almost done
      src/components/Bmi.tsx   67%  (1 missing)

    Dynamic keys (1 call sites could not be checked)
      --> src/components/Bmi.tsx:9:14  template with expression

    Unused keys (1 in en not referenced by any UI file)
      - common:cancel

    Summary
      locale files: 2 analyzed, 1 with issues, 1 missing in ar, 0 missing in en, 0 structural
      components: 1 with keys, 1 with issues, 1 missing in ar, 0 missing in en, 0 structural
      2 UI files scanned, 1 dynamic key

    ✘ 1 key missing in ar

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_shared_missing_key_is_counted_once() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en/common.json", r#"{"save": "Save"}"#),
        ("locales/ar/common.json", "{}"),
        (
            "src/A.tsx",
            r#"const a = t("save"); const b = t("common:save");"#,
        ),
        ("src/B.tsx", r#"const c = t("save");"#),
    ])?;

    assert_cmd_snapshot!(test.audit_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Locale files (en → ar)
      ✘ common    0%  1 missing in ar
          missing in ar:
            - save

    Components (2 using translation keys)
      largest gaps first:
      ✘ src/A.tsx    0%  1 missing in ar
          missing in ar:
            - common:save
      ✘ src/B.tsx    0%  1 missing in ar
          missing in ar:
            - common:save

    Almost done
      src/A.tsx    0%  (1 missing)
      src/B.tsx    0%  (1 missing)

    Summary
      locale files: 1 analyzed, 1 with issues, 1 missing in ar, 0 missing in en, 0 structural
      components: 2 with keys, 2 with issues, 2 missing in ar, 0 missing in en, 0 structural
      2 UI files scanned, 0 dynamic keys

    ✘ 1 key missing in ar

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_unparseable_component_is_skipped() -> Result<()> {
    let test = ten_versus_eight_plus_two()?;
    test.write_file("src/components/Broken.tsx", "export const = <div>;")?;
    test.write_file("src/components/Ok.tsx", r#"const x = t("k1");"#)?;

    let output = run(&mut test.audit_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stderr.contains("skipping UI source file"));
    assert!(output.stdout.contains("warning: src/components/Broken.tsx"));
    assert!(output.stdout.contains("every used key exists in ar"));

    Ok(())
}

#[test]
fn test_json_out() -> Result<()> {
    let test = ten_versus_eight_plus_two()?;

    let mut cmd = test.audit_command();
    cmd.args(["--json-out", "report.json"]);
    let output = run(&mut cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("JSON report written to report.json"));

    let report: Value = serde_json::from_str(&test.read_file("report.json")?)?;
    assert_eq!(report["sourceLocale"], json!("en"));
    assert_eq!(report["targetLocale"], json!("ar"));
    let common = &report["localeFiles"][0];
    assert_eq!(common["name"], json!("common"));
    assert_eq!(common["kind"], json!("localeFile"));
    assert_eq!(common["missingInTargetLocale"], json!(["k10", "k9"]));
    assert_eq!(common["missingInSourceLocale"], json!(["extra1", "extra2"]));
    assert_eq!(common["structuralDifferences"], json!([]));
    assert_eq!(common["coverage"], json!(80));
    assert_eq!(report["localeTotals"]["missingInTargetLocale"], json!(2));
    assert_eq!(report["localeTotals"]["filesWithIssues"], json!(1));

    Ok(())
}

#[test]
fn test_json_out_write_error_is_fatal() -> Result<()> {
    let test = ten_versus_eight_plus_two()?;

    let mut cmd = test.audit_command();
    cmd.args(["--json-out", "missing-dir/report.json"]);
    let output = run(&mut cmd)?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to write JSON report"));

    Ok(())
}

#[test]
fn test_fail_on_missing() -> Result<()> {
    let test = ten_versus_eight_plus_two()?;

    let mut cmd = test.audit_command();
    cmd.arg("--fail-on-missing");
    assert_eq!(run(&mut cmd)?.code, Some(1));

    let complete = CliTest::with_files(&[
        ("locales/en/common.json", r#"{"save": "Save"}"#),
        ("locales/ar/common.json", r#"{"save": "حفظ", "extra": "x"}"#),
    ])?;
    let mut cmd = complete.audit_command();
    cmd.arg("--fail-on-missing");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Locale files (en → ar)
      ✘ common  100%  1 missing in en
          missing in en:
            - extra

    Components (0 using translation keys)
      ✓ every used key exists in ar

    Summary
      locale files: 1 analyzed, 1 with issues, 0 missing in ar, 1 missing in en, 0 structural
      components: 0 with keys, 0 with issues, 0 missing in ar, 0 missing in en, 0 structural
      0 UI files scanned, 0 dynamic keys

    ✓ No keys missing in ar

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_config_file_and_labels() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".localeauditrc.json",
            r#"{
  "sourceLocale": "en",
  "targetLocale": "fr",
  "sourceLocaleDir": "i18n/en",
  "targetLocaleDir": "i18n/fr",
  "uiSourceGlobs": ["components"]
}"#,
        ),
        ("i18n/en/common.json", r#"{"save": "Save", "close": "Close"}"#),
        ("i18n/fr/common.json", r#"{"save": "Enregistrer"}"#),
        ("components/Dialog.jsx", r#"const a = t("close");"#),
    ])?;

    assert_cmd_snapshot!(test.command().arg("audit"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Locale files (en → fr)
      ✘ common   50%  1 missing in fr
          missing in fr:
            - close

    Components (1 using translation keys)
      largest gaps first:
      ✘ components/Dialog.jsx    0%  1 missing in fr
          missing in fr:
            - common:close

    Almost done
      components/Dialog.jsx    0%  (1 missing)

    Unused keys (1 in en not referenced by any UI file)
      - common:save

    Summary
      locale files: 1 analyzed, 1 with issues, 1 missing in fr, 0 missing in en, 0 structural
      components: 1 with keys, 1 with issues, 1 missing in fr, 0 missing in en, 0 structural
      1 UI file scanned, 0 dynamic keys

    ✘ 1 key missing in fr

    ----- stderr -----
    ");

    // CLI flags win over the config file.
    let output = run(test.command().args(["audit", "--target-locale", "ar"]))?;
    assert!(output.stdout.contains("Locale files (en \u{2192} ar)"));

    Ok(())
}

#[test]
fn test_root_flag() -> Result<()> {
    let test = ten_versus_eight_plus_two()?;
    let root = test.root().display().to_string();
    let mut cmd = test.command();
    cmd.current_dir(std::env::temp_dir());
    cmd.args([
        "audit",
        "--root",
        root.as_str(),
        "--source-locale-dir",
        "locales/en",
        "--target-locale-dir",
        "locales/ar",
    ]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Locale files (en → ar)
      ✘ common   80%  2 missing in ar, 2 missing in en
          missing in ar:
            - k10
            - k9
          missing in en:
            - extra1
            - extra2

    Components (0 using translation keys)
      ✓ every used key exists in ar

    Summary
      locale files: 1 analyzed, 1 with issues, 2 missing in ar, 2 missing in en, 0 structural
      components: 0 with keys, 0 with issues, 0 missing in ar, 0 missing in en, 0 structural
      0 UI files scanned, 0 dynamic keys

    ✘ 2 keys missing in ar

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_nonexistent_root_is_fatal() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().args(["audit", "--root", "no/such/dir"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Root directory not found: no/such/dir
    ");

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = ten_versus_eight_plus_two()?;
    test.write_file(".localeauditrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = run(&mut test.audit_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Invalid glob pattern in 'ignores'"));

    test.write_file(".localeauditrc.json", r#"{ "translationFunctions": [] }"#)?;
    assert_cmd_snapshot!(test.audit_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: 'translationFunctions' must name at least one function
    ");

    Ok(())
}

#[test]
fn test_verbose_lists_every_key() -> Result<()> {
    let keys: Vec<String> = (0..12).map(|i| format!("\"key{:02}\": \"v\"", i)).collect();
    let en_common = format!("{{{}}}", keys.join(", "));
    let test = CliTest::with_files(&[
        ("locales/en/common.json", en_common.as_str()),
        ("locales/ar/common.json", "{}"),
    ])?;

    let output = run(&mut test.audit_command())?;
    assert!(output.stdout.contains("... and 2 more (use -v to list all)"));
    assert!(!output.stdout.contains("- key11"));

    let mut cmd = test.audit_command();
    cmd.arg("--verbose");
    let output = run(&mut cmd)?;
    assert!(output.stdout.contains("- key11"));
    assert!(!output.stdout.contains("more (use -v"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = run(&mut test.command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Usage:"));
    assert!(output.stdout.contains("audit"));

    Ok(())
}
