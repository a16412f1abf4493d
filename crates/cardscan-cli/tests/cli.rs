use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CARD: &str = "JOHN SMITH\nCEO & Founder\nAcme Corp\njohn.smith @ acme . com\n\
                    +1 555-123-4567\nwww acme com\n123 Main St, Springfield, USA\n";

/// `cardscan` with the user config directory pointed into `home`.
fn cardscan(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cardscan").unwrap();
    cmd.env("XDG_CONFIG_HOME", home).env("HOME", home);
    cmd
}

#[test]
fn extract_text_card_as_json() {
    let dir = TempDir::new().unwrap();
    let card = dir.path().join("card.txt");
    fs::write(&card, CARD).unwrap();

    let output = cardscan(dir.path())
        .args(["extract", "--ocr-confidence", "82"])
        .arg(&card)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["full_name"], "John Smith");
    assert_eq!(json["email"], "john.smith@acme.com");
    assert_eq!(json["website"], "www.acme.com");
    assert_eq!(json["confidence"], 86);
    assert_eq!(json["scores"]["ocr"], 82);
}

#[test]
fn extract_from_stdin_as_text() {
    let dir = TempDir::new().unwrap();

    cardscan(dir.path())
        .args(["extract", "-", "-f", "text"])
        .write_stdin("Jane Roe\njane@globex fr\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Email:    jane@globex.fr"))
        .stdout(predicate::str::contains("Company:  Globex"));
}

#[test]
fn extract_image_through_sidecar() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("front.png");
    fs::write(&image, b"not decoded").unwrap();
    fs::write(
        dir.path().join("front.png.ocr.json"),
        r#"{"text": "Jane Roe\nProduct Designer\nwww.initech.io", "confidence": 71}"#,
    )
    .unwrap();

    cardscan(dir.path())
        .args(["extract", "-f", "csv"])
        .arg(&image)
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Roe,Product Designer,Initech"));
}

#[test]
fn extract_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let card = dir.path().join("card.txt");
    let out = dir.path().join("contact.json");
    fs::write(&card, CARD).unwrap();

    cardscan(dir.path())
        .arg("extract")
        .arg(&card)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written"));

    assert!(fs::read_to_string(&out).unwrap().contains("\"phone\": \"+1 555-123-4567\""));
}

#[test]
fn extract_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    cardscan(dir.path())
        .arg("extract")
        .arg(dir.path().join("absent.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn extract_rejects_out_of_range_confidence() {
    let dir = TempDir::new().unwrap();
    let card = dir.path().join("card.txt");
    fs::write(&card, CARD).unwrap();

    cardscan(dir.path())
        .args(["extract", "--ocr-confidence", "150"])
        .arg(&card)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn batch_writes_outputs_and_ordered_summary() {
    let dir = TempDir::new().unwrap();
    let cards = dir.path().join("cards");
    let out = dir.path().join("out");
    fs::create_dir_all(&cards).unwrap();
    fs::write(cards.join("a.txt"), CARD).unwrap();
    fs::write(cards.join("b.txt"), "Jane Roe\nhello@initech.io\n").unwrap();

    cardscan(dir.path())
        .args(["batch", "-j", "2", "--summary", "-o"])
        .arg(&out)
        .arg(format!("{}/*.txt", cards.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let rows: Vec<&str> = summary.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with("a.txt,success,John Smith,Acme Corp,john.smith@acme.com"));
    assert!(rows[2].starts_with("b.txt,success,Jane Roe,Initech,hello@initech.io"));
}

#[test]
fn batch_stops_on_error_unless_told_to_continue() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), CARD).unwrap();
    fs::write(dir.path().join("b.json"), "{broken").unwrap();
    let pattern = format!("{}/*.*", dir.path().display());

    cardscan(dir.path())
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    cardscan(dir.path())
        .args(["batch", "--continue-on-error", &pattern])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));
}

#[test]
fn config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("cardscan.json");
    let config_arg = config.to_str().unwrap();

    cardscan(dir.path())
        .args(["config", "-c", config_arg, "init"])
        .assert()
        .success();
    assert!(config.exists());

    cardscan(dir.path())
        .args(["config", "-c", config_arg, "set", "extraction.keep_raw_text", "false"])
        .assert()
        .success();

    cardscan(dir.path())
        .args(["config", "-c", config_arg, "get", "extraction.keep_raw_text"])
        .assert()
        .success()
        .stdout(predicate::str::diff("false\n"));

    cardscan(dir.path())
        .args(["config", "-c", config_arg, "set", "extraction.keep_raw_text", "maybe"])
        .assert()
        .failure();

    cardscan(dir.path())
        .args(["config", "-c", config_arg, "get", "extraction.no_such_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn config_file_drives_extraction() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("cardscan.json");
    fs::write(
        &config,
        r#"{"extraction": {"keep_raw_text": false}, "recognition": {"default_confidence": 64}}"#,
    )
    .unwrap();
    let card = dir.path().join("card.txt");
    fs::write(&card, CARD).unwrap();

    let output = cardscan(dir.path())
        .arg("-c")
        .arg(&config)
        .arg("extract")
        .arg(&card)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json.get("raw_text").is_none());
    assert_eq!(json["scores"]["ocr"], 64);
}
