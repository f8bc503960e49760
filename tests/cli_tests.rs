//! CLI integration tests for nbcache

use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Get the path to the built binary
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/debug/nbcache")
}

/// Build the binary before running tests
fn ensure_binary_built() {
    let status = Command::new("cargo")
        .args(["build"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .status()
        .expect("Failed to build binary");
    assert!(status.success(), "Failed to build binary");
}

/// Write a small sh-kernel notebook into the given directory
fn write_notebook(dir: &TempDir, name: &str, sources: &[&str]) -> PathBuf {
    let cells: Vec<Value> = sources
        .iter()
        .map(|s| {
            json!({
                "cell_type": "code",
                "source": s,
                "outputs": [],
                "metadata": {},
                "execution_count": null
            })
        })
        .collect();
    let nb = json!({
        "cells": cells,
        "metadata": {"kernelspec": {"name": "sh"}},
        "nbformat": 4,
        "nbformat_minor": 5
    });
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(&nb).unwrap()).unwrap();
    path
}

mod cli_behavior {
    use super::*;

    #[test]
    fn test_help_flag() {
        ensure_binary_built();
        let output = Command::new(binary_path())
            .arg("--help")
            .output()
            .expect("Failed to run binary");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("cache their outputs"));
        assert!(stdout.contains("--cache-dir"));
        assert!(stdout.contains("--setup-cells"));
    }

    #[test]
    fn test_version_flag() {
        ensure_binary_built();
        let output = Command::new(binary_path())
            .arg("--version")
            .output()
            .expect("Failed to run binary");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("nbcache"));
    }

    #[test]
    fn test_missing_notebook_argument() {
        ensure_binary_built();
        let output = Command::new(binary_path())
            .output()
            .expect("Failed to run binary");

        // Should fail with missing required argument
        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("NOTEBOOKS") || stderr.contains("required"));
    }

    #[test]
    fn test_nonexistent_notebook() {
        ensure_binary_built();
        let output = Command::new(binary_path())
            .arg("/nonexistent/notebook.ipynb")
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Cannot read notebook"));
    }
}

mod processing {
    use super::*;

    #[test]
    fn test_processed_notebook_written_to_stdout() {
        ensure_binary_built();
        let temp = TempDir::new().unwrap();
        let nb_path = write_notebook(&temp, "nb.ipynb", &["x=1", "echo $x"]);
        let cache_dir = temp.path().join("cache");

        let output = Command::new(binary_path())
            .arg("--cache-dir")
            .arg(&cache_dir)
            .arg(&nb_path)
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(0));
        let nb: Value = serde_json::from_slice(&output.stdout).expect("stdout is a notebook");
        let outputs = nb["cells"][1]["outputs"].as_array().unwrap();
        assert_eq!(outputs[0]["output_type"], "stream");
        assert_eq!(outputs[0]["text"], "1\n");

        // Progress lines go to stderr, not into the notebook stream
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Executing cell"));
    }

    #[test]
    fn test_second_invocation_hits_cache() {
        ensure_binary_built();
        let temp = TempDir::new().unwrap();
        let nb_path = write_notebook(&temp, "nb.ipynb", &["x=1", "echo $x"]);
        let cache_dir = temp.path().join("cache");

        let run = || {
            Command::new(binary_path())
                .arg("--cache-dir")
                .arg(&cache_dir)
                .arg(&nb_path)
                .output()
                .expect("Failed to run binary")
        };

        let first = run();
        assert_eq!(first.status.code(), Some(0));

        let second = run();
        assert_eq!(second.status.code(), Some(0));
        let stderr = String::from_utf8_lossy(&second.stderr);
        assert!(stderr.contains("Cache hit"));
        assert!(!stderr.contains("Executing cell"));
        assert_eq!(second.stdout, first.stdout);
    }
}
