//! Directory walking and run reporting.
//!
//! Drives the rewriter over every header in the configured directories,
//! strictly one file at a time, and aggregates the results into a
//! [`RunSummary`]. A failure on one file is recorded and the run moves on;
//! it never aborts the remaining files.
//!
//! ## Example Output
//!
//! ```text
//! Scanning: include/heater
//! 📄 include/heater/HeaterMonitor.h
//!    ✓ line 4: HeaterController -> forward declaration (pointer)
//!    ✗ line 5: TempSensor needs full include (direct value)
//!    + inserted forward-declaration include
//! ```

use crate::config::FwdConfig;
use crate::rewrite::{self, FileOutcome, FileReport};
use anyhow::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const HEADER_EXTENSIONS: [&str; 2] = ["h", "hpp"];

/// Aggregate result of one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Headers actually processed (excluded files don't count).
    pub files: usize,
    /// Files whose content changed (or would change in a dry run).
    pub changed_files: usize,
    /// Total converted includes across all files.
    pub conversions: usize,
    /// Allow-listed includes that stayed because the full type is needed.
    pub kept: usize,
    /// Files that could not be read or written, with the error message.
    pub failures: Vec<(PathBuf, String)>,
}

/// Walk the configured directories under `root` and rewrite every eligible
/// header. Missing directories produce a warning and contribute nothing.
pub fn run(root: &Path, cfg: &FwdConfig, apply: bool) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for dir in &cfg.dirs {
        let full_path = root.join(dir);
        if !full_path.is_dir() {
            println!(
                "{} Directory not found: {}",
                "!".yellow(),
                full_path.display()
            );
            continue;
        }

        println!("\n{} Scanning: {}", "🔍".cyan(), dir.bold());

        let files = collect_headers(&full_path, cfg);
        if files.is_empty() {
            println!("   {}", "no header files".dimmed());
            continue;
        }

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        for path in &files {
            let name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            pb.set_message(name);

            match rewrite::process_file(path, cfg, apply) {
                Ok(report) => {
                    pb.suspend(|| print_file_report(&report));
                    summary.files += 1;
                    summary.conversions += report.changes.len();
                    summary.kept += report.kept.len();
                    if report.outcome != FileOutcome::Unchanged {
                        summary.changed_files += 1;
                    }
                }
                Err(e) => {
                    pb.suspend(|| {
                        println!("{} {}: {:#}", "x".red(), path.display(), e);
                    });
                    summary.failures.push((path.clone(), format!("{:#}", e)));
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
    }

    print_summary(&summary, apply);
    Ok(summary)
}

/// Headers under `dir` in traversal order, minus the exclusion set.
fn collect_headers(dir: &Path, cfg: &FwdConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension() else {
            continue;
        };
        if !HEADER_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()) {
            continue;
        }
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if cfg.exclude.contains(&name) {
            println!("   {} Skipping: {}", "⏭".dimmed(), name.dimmed());
            continue;
        }
        files.push(path.to_path_buf());
    }
    files
}

fn print_file_report(report: &FileReport) {
    if report.changes.is_empty() && report.kept.is_empty() {
        println!(
            "   {} {}",
            "·".dimmed(),
            format!("{} (no candidates)", report.path.display()).dimmed()
        );
        return;
    }

    println!("{} {}", "📄".blue(), report.path.display());
    for change in &report.changes {
        println!(
            "   {} line {}: {} -> forward declaration ({})",
            "✓".green(),
            change.line,
            change.class_name.bold(),
            change.evidence
        );
    }
    for kept in &report.kept {
        println!(
            "   {} line {}: {} needs full include ({})",
            "✗".red(),
            kept.line,
            kept.class_name.bold(),
            kept.evidence
        );
    }
    if report.inserted_forward {
        println!("   {} inserted forward-declaration include", "+".green());
    }

    match report.outcome {
        FileOutcome::Written => println!("   {} saved", "✓".green()),
        FileOutcome::DryReported => println!(
            "   {} would make {} change(s)",
            "📋".yellow(),
            report.changes.len()
        ),
        FileOutcome::Unchanged => {}
    }
}

fn print_summary(summary: &RunSummary, apply: bool) {
    println!();
    let mut table = crate::ui::Table::new(&["Metric", "Count"]);
    table.add_row(vec![
        "Files scanned".dimmed().to_string(),
        summary.files.to_string(),
    ]);
    table.add_row(vec![
        "Convertible includes".green().to_string(),
        summary.conversions.to_string(),
    ]);
    table.add_row(vec![
        "Includes kept".dimmed().to_string(),
        summary.kept.to_string(),
    ]);
    let changed_label = if apply {
        "Files modified"
    } else {
        "Files that would change"
    };
    table.add_row(vec![
        changed_label.yellow().to_string(),
        summary.changed_files.to_string(),
    ]);
    table.add_row(vec![
        "Failures".red().to_string(),
        summary.failures.len().to_string(),
    ]);
    table.print();

    if apply {
        println!(
            "{} Applied {} conversion(s) across {} file(s).",
            "✓".green(),
            summary.conversions,
            summary.changed_files
        );
    } else {
        println!(
            "{} Summary: {} potential conversion(s) found.",
            "🔍".cyan(),
            summary.conversions
        );
        if summary.conversions > 0 {
            println!("   Run with {} to apply changes.", "--apply".cyan().bold());
        }
    }

    if !summary.failures.is_empty() {
        println!(
            "{} {} file(s) could not be processed:",
            "x".red(),
            summary.failures.len()
        );
        for (path, err) in &summary.failures {
            println!("   {} {}", path.display().to_string().yellow(), err.dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_cfg(dirs: &[&str], classes: &[&str]) -> FwdConfig {
        FwdConfig {
            classes: classes.iter().map(|s| s.to_string()).collect(),
            exclude: ["forward.h"].iter().map(|s| s.to_string()).collect(),
            dirs: dirs.iter().map(|s| s.to_string()).collect(),
            forward_header: "forward.h".to_string(),
        }
    }

    const CONVERTIBLE: &str = "#pragma once\n\
#include \"heater/HeaterController.h\"\n\
\n\
HeaterController* ctrl;\n";

    #[test]
    fn test_dry_run_never_touches_disk() {
        let root = tempfile::tempdir().unwrap();
        let inc = root.path().join("include");
        fs::create_dir_all(&inc).unwrap();
        let header = inc.join("Device.h");
        fs::write(&header, CONVERTIBLE).unwrap();

        let cfg = test_cfg(&["include"], &["HeaterController"]);
        let summary = run(root.path(), &cfg, false).unwrap();

        assert_eq!(summary.conversions, 1);
        assert_eq!(summary.changed_files, 1);
        assert_eq!(fs::read_to_string(&header).unwrap(), CONVERTIBLE);
    }

    #[test]
    fn test_apply_rewrites_and_second_run_is_clean() {
        let root = tempfile::tempdir().unwrap();
        let inc = root.path().join("include");
        fs::create_dir_all(&inc).unwrap();
        let header = inc.join("Device.h");
        fs::write(&header, CONVERTIBLE).unwrap();

        let cfg = test_cfg(&["include"], &["HeaterController"]);
        let summary = run(root.path(), &cfg, true).unwrap();
        assert_eq!(summary.conversions, 1);

        let written = fs::read_to_string(&header).unwrap();
        assert!(written.contains("#include \"forward.h\""));
        assert!(written.contains("// CONVERTED"));

        let summary = run(root.path(), &cfg, true).unwrap();
        assert_eq!(summary.conversions, 0);
        assert_eq!(summary.changed_files, 0);
        assert_eq!(fs::read_to_string(&header).unwrap(), written);
    }

    #[test]
    fn test_missing_directory_contributes_zero() {
        let root = tempfile::tempdir().unwrap();
        let cfg = test_cfg(&["no/such/dir"], &["HeaterController"]);
        let summary = run(root.path(), &cfg, false).unwrap();
        assert_eq!(summary.files, 0);
        assert_eq!(summary.conversions, 0);
        assert!(summary.failures.is_empty());
    }

    #[test]
    fn test_excluded_file_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        let inc = root.path().join("include");
        fs::create_dir_all(&inc).unwrap();
        fs::write(inc.join("forward.h"), "#pragma once\nclass HeaterController;\n").unwrap();
        fs::write(inc.join("Device.h"), CONVERTIBLE).unwrap();

        let cfg = test_cfg(&["include"], &["HeaterController"]);
        let summary = run(root.path(), &cfg, false).unwrap();
        assert_eq!(summary.files, 1);
    }

    #[test]
    fn test_non_header_files_ignored() {
        let root = tempfile::tempdir().unwrap();
        let inc = root.path().join("include");
        fs::create_dir_all(&inc).unwrap();
        fs::write(inc.join("notes.txt"), "HeaterController* ctrl;").unwrap();

        let cfg = test_cfg(&["include"], &["HeaterController"]);
        let summary = run(root.path(), &cfg, false).unwrap();
        assert_eq!(summary.files, 0);
    }

    #[test]
    fn test_unreadable_file_is_isolated() {
        let root = tempfile::tempdir().unwrap();
        let inc = root.path().join("include");
        fs::create_dir_all(&inc).unwrap();
        // Invalid UTF-8 makes read_to_string fail for this file only.
        fs::write(inc.join("Broken.h"), [0xff, 0xfe, 0x00, 0x48]).unwrap();
        fs::write(inc.join("Device.h"), CONVERTIBLE).unwrap();

        let cfg = test_cfg(&["include"], &["HeaterController"]);
        let summary = run(root.path(), &cfg, false).unwrap();

        assert_eq!(summary.failures.len(), 1);
        assert!(summary.failures[0].0.ends_with("Broken.h"));
        // The healthy file was still processed.
        assert_eq!(summary.conversions, 1);
    }
}
