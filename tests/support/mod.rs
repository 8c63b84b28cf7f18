#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Path to the compiled newsjudge binary
pub fn newsjudge_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_newsjudge"))
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn write_articles(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("articles.json");
    fs::write(&path, json).expect("Failed to write articles");
    path
}

/// Reads a CSV file into its header and data rows.
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV");
    let header = reader
        .headers()
        .expect("Missing header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| {
            r.expect("Malformed row")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    (header, rows)
}

/// Shell script standing in for `ollama`: invoked as `sh <script> run <model>`,
/// it reads the prompt from stdin and answers per model.
pub fn fake_ollama(dir: &Path) -> PathBuf {
    let path = dir.join("fake-ollama.sh");
    fs::write(
        &path,
        r#"prompt=$(cat)
case "$2" in
  gemma2:9b) echo "Non" ;;
  broken:latest) echo "model 'broken' not found" >&2; exit 1 ;;
  echo:latest) printf '%s\n' "$prompt" | head -n 1 ;;
  *) echo "  Oui  " ;;
esac
"#,
    )
    .expect("Failed to write fake backend");
    path
}

pub const EXPECTED_HEADER: [&str; 6] = [
    "name",
    "description",
    "url",
    "mistral_nemo_response",
    "llama32_response",
    "gemma2_response",
];
