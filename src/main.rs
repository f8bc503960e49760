//! nbcache - Notebook execution with filesystem output caching
//!
//! Reads each notebook given on the command line, executes its code
//! cells (serving unchanged cells from the output cache), and writes
//! the resulting notebook to stdout.

use clap::Parser;
use nbcache::cli::Cli;
use nbcache::engine::SubprocessEngine;
use nbcache::{notebook, process_notebook};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();
    let (config, notebooks) = cli.into_config();

    // Progress callback for logging; stdout carries the notebooks
    let progress = |msg: &str| {
        eprintln!("{}", msg);
    };

    let engine = SubprocessEngine;
    let stdout = io::stdout();

    for path in &notebooks {
        // === Phase 1: Read ===
        let mut nb = match notebook::read(path) {
            Ok(nb) => nb,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        };

        // Cells execute in the notebook's containing folder
        let working_dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let working_dir = working_dir.unwrap_or_else(|| Path::new("."));

        // === Phase 2: Process against the cache ===
        let report = match process_notebook(&mut nb, working_dir, &config, &engine, &progress) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        };
        progress(&format!(
            "{}: {} cell(s) executed, {} served from cache",
            path.display(),
            report.executed,
            report.cache_hits
        ));

        // === Phase 3: Write the processed notebook to stdout ===
        let mut out = stdout.lock();
        if let Err(e) = notebook::write(&nb, &mut out) {
            eprintln!("Error writing output: {}", e);
            return ExitCode::from(2);
        }
        if let Err(e) = out.flush() {
            eprintln!("Error flushing output: {}", e);
            return ExitCode::from(2);
        }
    }

    ExitCode::SUCCESS
}
