use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn koboscan() -> Command {
    Command::cargo_bin("koboscan").unwrap()
}

fn recorded_result() -> &'static str {
    r#"{
        "frontVizResult": {
            "fullName": { "description": "AHMAD KARIMI" },
            "dateOfBirth": { "originalDateStringResult": { "description": "15.06.1990" } },
            "documentNumber": { "description": "1400-0101-12345" },
            "additionalAddressInformation": { "description": "Kabul Kabul District1 Village1" }
        },
        "backVizResult": {
            "sex": { "description": "M" },
            "dateOfExpiry": { "originalDateStringResult": { "description": "01.01.2030" } }
        },
        "fathersName": { "description": "KARIM" },
        "dependentsInfo": [
            { "fullName": { "description": "SARA" }, "sex": { "description": "F" } }
        ],
        "fullDocumentFrontImage": "SGVsbG8="
    }"#
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Config without retry delays so failure paths finish quickly.
fn fast_config(dir: &Path) -> PathBuf {
    write(
        dir,
        "config.json",
        r#"{ "delivery": { "max_attempts": 3, "retry_delay_ms": 0 } }"#,
    )
}

#[test]
fn test_age() {
    koboscan()
        .args(["age", "15.06.1990", "--today", "2024-06-20"])
        .assert()
        .success()
        .stdout("34\n");

    koboscan()
        .args(["age", "900615", "--today", "2024-06-10"])
        .assert()
        .success()
        .stdout("33\n");
}

#[test]
fn test_age_unparseable_is_zero() {
    koboscan()
        .args(["age", "not-a-date", "--today", "2024-06-20"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_normalize_json() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "scan.json", recorded_result());
    let config = fast_config(dir.path());

    let output = koboscan()
        .arg("normalize")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success());
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records[0]["front"]["fullName"], "AHMAD KARIMI");
    assert_eq!(records[0]["front"]["sex"], "M");
    assert_eq!(records[0]["front"]["province"], "Kabul");
    assert_eq!(records[0]["frontImage"], "data:image/jpg;base64,SGVsbG8=");
}

#[test]
fn test_normalize_text_summary() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "scan.json", recorded_result());
    let config = fast_config(dir.path());

    koboscan()
        .arg("normalize")
        .arg(&input)
        .args(["--format", "text", "--mode", "single"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Full Name: AHMAD KARIMI"))
        .stdout(predicate::str::contains("Date of Expiry: \n"));
}

#[test]
fn test_normalize_unrecognized_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "scan.json", r#"{ "somethingElse": {} }"#);
    let config = fast_config(dir.path());

    koboscan()
        .arg("normalize")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Card not supported or scanning was canceled"));
}

#[test]
fn test_scan_delivers_to_directory() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "scan.json", recorded_result());
    let config = fast_config(dir.path());
    let handoff = dir.path().join("handoff");

    koboscan()
        .arg("scan")
        .arg(&input)
        .arg("--companion")
        .arg(&handoff)
        .args(["--today", "2024-06-20"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Full Name: AHMAD KARIMI"))
        .stdout(predicate::str::contains("Delivered record"));

    let payload: serde_json::Value =
        serde_json::from_slice(&fs::read(handoff.join("payload.json")).unwrap()).unwrap();
    assert_eq!(payload["age"], 34);
    assert_eq!(payload["gender"], "M");
    assert_eq!(payload["CoAAddress"], "");

    let extras: serde_json::Value =
        serde_json::from_slice(&fs::read(handoff.join("extras.json")).unwrap()).unwrap();
    assert_eq!(extras["dependentCount"], 1);
    assert_eq!(extras["dependent01_fullName"], "SARA");

    assert_eq!(fs::read(handoff.join("frontImage.jpg")).unwrap(), b"Hello");
}

#[test]
fn test_scan_cancelled_prints_message() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "scan.json", "null");
    let config = fast_config(dir.path());

    koboscan()
        .arg("scan")
        .arg(&input)
        .arg("--companion")
        .arg(dir.path().join("handoff"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Card not supported or scanning was canceled"));

    assert!(!dir.path().join("handoff").exists());
}

#[test]
fn test_scan_delivery_failure_keeps_summary() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "scan.json",
        r#"{
            "frontVizResult": { "fullName": { "description": "BROKEN IMAGE" } },
            "fullDocumentFrontImage": "@@@"
        }"#,
    );
    let config = fast_config(dir.path());

    koboscan()
        .arg("scan")
        .arg(&input)
        .arg("--companion")
        .arg(dir.path().join("handoff"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Full Name: BROKEN IMAGE"))
        .stderr(predicate::str::contains(
            "Failed to send data to KoboCollect. Please try again.",
        ))
        .stderr(predicate::str::contains("after 3 attempts"));

    assert!(!dir.path().join("handoff").join("payload.json").exists());
}

#[test]
fn test_scan_without_birth_date_delivers() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "scan.json",
        r#"{ "frontVizResult": { "fullName": { "description": "NO BIRTH DATE" } } }"#,
    );
    let config = fast_config(dir.path());
    let handoff = dir.path().join("handoff");

    koboscan()
        .arg("scan")
        .arg(&input)
        .arg("--companion")
        .arg(&handoff)
        .args(["--today", "2024-06-20"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Delivered record"));

    let payload: serde_json::Value =
        serde_json::from_slice(&fs::read(handoff.join("payload.json")).unwrap()).unwrap();
    assert_eq!(payload["fullName"], "NO BIRTH DATE");
    assert_eq!(payload["dateOfBirth"], "");
    assert_eq!(payload["documentNumber"], "");
    assert_eq!(payload["age"], 0);
}

#[test]
fn test_scan_require_fields_refuses_incomplete_record() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "scan.json",
        r#"{ "frontVizResult": { "fullName": { "description": "NO BIRTH DATE" } } }"#,
    );
    let config = fast_config(dir.path());
    let handoff = dir.path().join("handoff");

    koboscan()
        .arg("scan")
        .arg(&input)
        .arg("--companion")
        .arg(&handoff)
        .arg("--require-fields")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Full Name: NO BIRTH DATE"))
        .stderr(predicate::str::contains("dateOfBirth"));

    assert!(!handoff.join("payload.json").exists());
}

#[test]
fn test_batch_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    write(&inputs, "a.json", recorded_result());
    write(&inputs, "b.json", r#"{ "unknown": true }"#);
    let config = fast_config(dir.path());
    let out = dir.path().join("out");

    koboscan()
        .arg("batch")
        .arg(format!("{}/*.json", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful"));

    assert!(out.join("a.records.json").exists());
    assert!(!out.join("b.records.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.json,success,1,AHMAD KARIMI,1400-0101-12345,15.06.1990,"));
    assert!(summary.contains("b.json,error,0"));
}

#[test]
fn test_config_init_and_get() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    koboscan()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    koboscan()
        .args(["config", "get", "delivery.retry_delay_ms", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout("500\n");

    koboscan()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
