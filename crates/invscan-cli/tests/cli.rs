use std::fs;
use std::path::Path;

use assert_cmd::Command;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "\
Acme Widgets Inc.
Globex Corporation
Invoice #: INV-2024-001
Invoice Date: 03/15/2024
Due Date: 04/15/2024
Phone: (555) 123-4567
billing@acme.com
accounts@globex.com
Consulting Services 5 x $100.00 = $500.00
Travel Expenses 1 x 240.50
Subtotal $740.50
";

/// Command with HOME and XDG paths pointing into a scratch directory, so no
/// user configuration leaks in.
fn invscan(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("invscan").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write_sample(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn extract_prints_json() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(tmp.path(), "scan.txt", SAMPLE);

    invscan(tmp.path())
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"invoiceNumber\": \"INV-2024-001\""))
        .stdout(predicate::str::contains("\"invoiceDate\": \"2024-03-15\""))
        .stdout(predicate::str::contains("\"companyName\": \"Globex Corporation\""));
}

#[test]
fn extract_reads_stdin() {
    let tmp = TempDir::new().unwrap();

    invscan(tmp.path())
        .args(["extract", "-", "-f", "text"])
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice: INV-2024-001"))
        .stdout(predicate::str::contains("Consulting Services | 5 x 100.00"));
}

#[test]
fn extract_csv_to_file() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(tmp.path(), "scan.txt", SAMPLE);
    let output = tmp.path().join("out.csv");

    invscan(tmp.path())
        .arg("extract")
        .arg(&input)
        .args(["-f", "csv", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("Travel Expenses,1,240.50"));
}

#[test]
fn extract_with_confidence_and_ocr_score() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(tmp.path(), "scan.txt", SAMPLE);

    invscan(tmp.path())
        .arg("extract")
        .arg(&input)
        .args(["--show-confidence", "--ocr-confidence", "91.5", "--include-text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ocrConfidence\": 91.5"))
        .stdout(predicate::str::contains("invoiceNumber: 70% (medium)"))
        .stdout(predicate::str::contains("OCR confidence: 91.5%"));
}

#[test]
fn extract_rejects_out_of_range_ocr_confidence() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(tmp.path(), "scan.txt", SAMPLE);

    invscan(tmp.path())
        .arg("extract")
        .arg(&input)
        .args(["--ocr-confidence", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 100"));
}

#[test]
fn extract_empty_text_asks_for_manual_entry() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(tmp.path(), "smudge.txt", "~~ smudged ~~\n");

    invscan(tmp.path())
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"confidence\": {}"))
        .stderr(predicate::str::contains("No invoice fields recognized"))
        .stderr(predicate::str::contains("~~ smudged ~~"));
}

#[test]
fn extract_missing_file_fails() {
    let tmp = TempDir::new().unwrap();

    invscan(tmp.path())
        .args(["extract", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let tmp = TempDir::new().unwrap();
    let scans = tmp.path().join("scans");
    fs::create_dir(&scans).unwrap();
    write_sample(&scans, "a.txt", SAMPLE);
    write_sample(&scans, "b.txt", "nothing useful");
    let out = tmp.path().join("out");

    invscan(tmp.path())
        .arg("batch")
        .arg(format!("{}/*.txt", scans.display()))
        .arg("-o")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("Summary written to"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("a.txt,success,INV-2024-001,2024-03-15,2024-04-15"));
    assert!(lines[2].starts_with("b.txt,empty,"));
}

#[test]
fn batch_without_matches_fails() {
    let tmp = TempDir::new().unwrap();

    invscan(tmp.path())
        .arg("batch")
        .arg(format!("{}/*.txt", tmp.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn draft_applies_extraction() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(tmp.path(), "scan.txt", SAMPLE);

    let output = invscan(tmp.path())
        .arg("draft")
        .arg(&input)
        .args(["--date", "2024-03-01", "--email"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Total due: $740.50"))
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["draft"]["invoiceNumber"], "INV-2024-001");
    assert_eq!(report["draft"]["invoiceDate"], "2024-03-15");
    assert_eq!(report["draft"]["sender"]["companyName"], "Acme Widgets Inc.");
    assert_eq!(report["draft"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(report["totals"]["total"], 740.5);
    assert_eq!(report["issues"], serde_json::json!([]));
    assert!(
        report["emailLink"]
            .as_str()
            .unwrap()
            .starts_with("mailto:accounts@globex.com?subject=Invoice%20INV-2024-001%20from%20Acme")
    );
}

#[test]
fn draft_reports_validation_issues() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(tmp.path(), "blank.txt", "");

    invscan(tmp.path())
        .arg("draft")
        .arg(&input)
        .args(["--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"invoiceNumber\": \"INV-20240301-"))
        .stdout(predicate::str::contains("\"missingSenderName\""))
        .stderr(predicate::str::contains("Sender company name is required"));
}

#[test]
fn config_init_get_set() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("invscan.json");

    invscan(tmp.path())
        .args(["config", "init", "-o"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    invscan(tmp.path())
        .args(["config", "get", "draft.currency", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"USD\""));

    invscan(tmp.path())
        .args(["config", "set", "draft.due_in_days", "14", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set draft.due_in_days = 14"));

    let saved = fs::read_to_string(&config).unwrap();
    assert!(saved.contains("\"due_in_days\": 14"));
}

#[test]
fn config_init_refuses_overwrite() {
    let tmp = TempDir::new().unwrap();
    let config = write_sample(tmp.path(), "invscan.json", "{}");

    invscan(tmp.path())
        .args(["config", "init", "-o"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn config_unknown_key_fails() {
    let tmp = TempDir::new().unwrap();

    invscan(tmp.path())
        .args(["config", "get", "ocr.engine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration key not found"));
}

#[test]
fn config_drives_draft_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = write_sample(
        tmp.path(),
        "invscan.json",
        r#"{"draft": {"currency": "EUR", "number_prefix": "ACME"}}"#,
    );
    let input = write_sample(tmp.path(), "blank.txt", "");

    invscan(tmp.path())
        .arg("draft")
        .arg(&input)
        .args(["--date", "2024-03-01", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"currency\": \"EUR\""))
        .stdout(predicate::str::contains("\"invoiceNumber\": \"ACME-20240301-"));
}

#[test]
fn preprocess_binarizes_image() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("scan.png");
    let output = tmp.path().join("clean.png");

    RgbImage::from_fn(16, 8, |x, _| {
        if x < 8 { Rgb([25, 30, 35]) } else { Rgb([225, 220, 210]) }
    })
    .save(&input)
    .unwrap();

    invscan(tmp.path())
        .arg("preprocess")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 16x8 image"));

    let processed: DynamicImage = image::open(&output).unwrap();
    assert_eq!(processed.dimensions(), (16, 8));
    let gray = processed.to_luma8();
    assert!(gray.pixels().all(|p| p[0] == 0 || p[0] == 255));
}

#[test]
fn preprocess_missing_input_fails() {
    let tmp = TempDir::new().unwrap();

    invscan(tmp.path())
        .args(["preprocess", "missing.png", "-o", "out.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn verbose_flag_after_subcommand() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(tmp.path(), "scan.txt", SAMPLE);

    invscan(tmp.path())
        .arg("extract")
        .arg("-vv")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"invoiceNumber\": \"INV-2024-001\""));
}

#[test]
fn draft_with_oversized_amount_fails_cleanly() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(
        tmp.path(),
        "huge.txt",
        "Widget 4000000000 x 79228162514264337593543950335\n",
    );

    invscan(tmp.path())
        .arg("draft")
        .arg(&input)
        .args(["--date", "2024-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount overflow"))
        .stderr(predicate::str::contains("panicked").not());
}
