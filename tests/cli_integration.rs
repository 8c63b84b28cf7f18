//! CLI integration tests
//!
//! Run the built binary end to end, with a shell script standing in for
//! `ollama`, and check exit codes, output files and console messages.

#![cfg(unix)]

mod support;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use support::{fake_ollama, fixture, newsjudge_binary, read_csv, EXPECTED_HEADER};
use tempfile::TempDir;

/// Runs `newsjudge classify` against the fake backend script.
fn classify(dir: &Path, input: &Path, extra: &[&str]) -> Output {
    let script = fake_ollama(dir);
    Command::new(newsjudge_binary())
        .arg("classify")
        .arg("--input")
        .arg(input)
        .arg("--output")
        .arg(dir.join("resultats.csv"))
        .arg("--program")
        .arg("sh")
        .arg("--program-arg")
        .arg(&script)
        .arg("--program-arg")
        .arg("run")
        .args(extra)
        .env_remove("NEWSJUDGE_TIMEOUT")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute newsjudge")
}

#[test]
fn test_cli_help() {
    let output = Command::new(newsjudge_binary())
        .arg("--help")
        .output()
        .expect("Failed to execute newsjudge");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("classify"));
    assert!(stdout.contains("prompt"));
}

#[test]
fn test_classify_with_default_backends() {
    let dir = TempDir::new().unwrap();
    let output = classify(dir.path(), &fixture("orange.json"), &[]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (header, rows) = read_csv(&dir.path().join("resultats.csv"));
    assert_eq!(header, EXPECTED_HEADER);
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row[3..], ["Oui", "Oui", "Non"]);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Processed article"));
}

#[test]
fn test_failing_backend_keeps_its_stdout_and_logs() {
    let dir = TempDir::new().unwrap();
    let output = classify(
        dir.path(),
        &fixture("orange.json"),
        &["-b", "ok=llama3.2:latest", "-b", "broken:latest"],
    );

    assert!(output.status.success());

    let (header, rows) = read_csv(&dir.path().join("resultats.csv"));
    assert_eq!(header, ["name", "description", "url", "ok_response", "broken_response"]);
    for row in &rows {
        assert_eq!(row[3], "Oui");
        assert_eq!(row[4], "");
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Backend exited with failure"));
    assert!(stderr.contains("model 'broken' not found"));
}

#[test]
fn test_backend_receives_prompt_on_stdin() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("one.json");
    fs::write(&input, r#"[{"name": "Orange choisit HPE", "description": "IA"}]"#).unwrap();

    let output = classify(dir.path(), &input, &["-b", "echo=echo:latest"]);
    assert!(output.status.success());

    let (_, rows) = read_csv(&dir.path().join("resultats.csv"));
    assert!(rows[0][3].starts_with("En lisant/analysant \"Orange choisit HPE\" et \"IA\""));
}

#[test]
fn test_missing_program_writes_error_markers() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(newsjudge_binary())
        .arg("classify")
        .arg("--input")
        .arg(fixture("orange.json"))
        .arg("--output")
        .arg(dir.path().join("out.csv"))
        .arg("--program")
        .arg("newsjudge-missing-ollama-xyz")
        .arg("-q")
        .output()
        .expect("Failed to execute newsjudge");

    assert!(output.status.success());

    let (_, rows) = read_csv(&dir.path().join("out.csv"));
    assert_eq!(rows.len(), 3);
    for row in &rows {
        for field in &row[3..] {
            assert!(field.starts_with("Erreur: "), "unexpected field: {}", field);
        }
    }
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = classify(dir.path(), &dir.path().join("absent.json"), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input file not found") || stderr.contains("Input file not found"));
    assert!(!dir.path().join("resultats.csv").exists());
}

#[test]
fn test_malformed_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, "{ not json").unwrap();

    let output = classify(dir.path(), &input, &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not valid JSON"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let output = classify(
        dir.path(),
        &fixture("orange.json"),
        &["-b", "same=llama3.2:latest", "-b", "same=gemma2:9b"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Duplicate backend label 'same'"));
}

#[test]
fn test_show_config() {
    let output = Command::new(newsjudge_binary())
        .args(["classify", "--show-config", "--timeout", "30"])
        .env_remove("NEWSJUDGE_INPUT")
        .output()
        .expect("Failed to execute newsjudge");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Input: orange.json"));
    assert!(stdout.contains("Backend: mistral_nemo -> mistral-nemo:latest"));
    assert!(stdout.contains("Timeout: 30s"));
}

#[test]
fn test_prompt_command() {
    let output = Command::new(newsjudge_binary())
        .args([
            "prompt",
            "--name",
            "Orange propose deux mois gratuits",
            "--description",
            "Offre fibre",
        ])
        .output()
        .expect("Failed to execute newsjudge");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(
        "En lisant/analysant \"Orange propose deux mois gratuits\" et \"Offre fibre\""
    ));
    assert!(stdout.contains("Réponds uniquement par \"Oui\" ou \"Non\""));
}

#[test]
fn test_prompt_with_custom_template() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("prompt.txt");
    fs::write(&template, "Titre={name};Résumé={description}").unwrap();

    let output = Command::new(newsjudge_binary())
        .args(["prompt", "--name", "A", "--description", "B", "--template"])
        .arg(&template)
        .output()
        .expect("Failed to execute newsjudge");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "Titre=A;Résumé=B");
}
