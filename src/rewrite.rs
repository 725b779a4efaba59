//! Include rewriting for a single header file.
//!
//! [`plan_rewrite`] is a pure transform from the file's text to a new line
//! sequence: convertible includes become commented-out copies tagged with a
//! marker, and the forward-declaration header is inserted once right after
//! the include guard. [`process_file`] wraps it with I/O and only persists
//! in apply mode, via a sibling temp file and an atomic rename.
//!
//! Only live, quoted `.h` includes are considered, so a second pass over an
//! already-converted file finds nothing left to do.

use crate::classify::{self, UsageEvidence};
use crate::config::FwdConfig;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// One converted include line.
#[derive(Debug, Clone)]
pub struct ChangeRecord {
    /// 1-based line number in the original file.
    pub line: usize,
    pub old: String,
    pub new: String,
    pub class_name: String,
    pub evidence: UsageEvidence,
}

/// An allow-listed include that stayed because the file needs the full type.
#[derive(Debug, Clone)]
pub struct KeptInclude {
    pub line: usize,
    pub class_name: String,
    pub evidence: UsageEvidence,
}

/// Result of planning a rewrite, before anything touches the disk.
#[derive(Debug)]
pub struct RewritePlan {
    pub new_text: String,
    pub changes: Vec<ChangeRecord>,
    pub kept: Vec<KeptInclude>,
    /// Whether the forward-declaration include was added by this plan.
    pub inserted_forward: bool,
}

/// Terminal state of a processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Nothing to change.
    Unchanged,
    /// Changes computed and reported, not persisted (dry run).
    DryReported,
    /// Changes persisted to disk.
    Written,
}

/// Per-file report handed back to the walker.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub changes: Vec<ChangeRecord>,
    pub kept: Vec<KeptInclude>,
    pub inserted_forward: bool,
    pub outcome: FileOutcome,
}

/// Derive the class name from a quoted include path, e.g.
/// `heater/HeaterController` -> `HeaterController` (the `.h` extension is
/// already stripped by the include pattern).
fn class_from_include(include_path: &str) -> String {
    Path::new(include_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| include_path.to_string())
}

/// Where the forward-declaration include belongs: right after `#pragma
/// once`, or after the `#define` of a classic `#ifndef` guard. Headers
/// without any guard get it at the very top so a converted file still
/// compiles.
fn insertion_point(lines: &[String]) -> usize {
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed == "#pragma once" {
            return i + 1;
        }
        if trimmed.starts_with("#ifndef ") {
            if let Some(next) = lines.get(i + 1)
                && next.trim().starts_with("#define ")
            {
                return i + 2;
            }
            return i + 1;
        }
    }
    0
}

/// Compute the rewritten text for one header. Pure function; no I/O.
pub fn plan_rewrite(content: &str, cfg: &FwdConfig) -> RewritePlan {
    // Live includes only: a commented-out line never matches again.
    let include_re = Regex::new(r#"^(#include\s+"([^"]+)\.h"\s*)$"#).unwrap();

    let mut new_lines: Vec<String> = Vec::new();
    let mut changes = Vec::new();
    let mut kept = Vec::new();

    for (i, line) in content.split('\n').enumerate() {
        if let Some(caps) = include_re.captures(line) {
            let directive = caps.get(1).map_or("", |m| m.as_str());
            let include_path = caps.get(2).map_or("", |m| m.as_str());
            let class_name = class_from_include(include_path);

            if cfg.classes.contains(&class_name) {
                let (ok, evidence) = classify::can_forward_declare(content, &class_name);
                if ok {
                    let new_line =
                        format!("// {} // CONVERTED: Use {}", directive, cfg.forward_header);
                    changes.push(ChangeRecord {
                        line: i + 1,
                        old: line.to_string(),
                        new: new_line.clone(),
                        class_name,
                        evidence,
                    });
                    new_lines.push(new_line);
                    continue;
                }
                kept.push(KeptInclude {
                    line: i + 1,
                    class_name,
                    evidence,
                });
            }
        }
        new_lines.push(line.to_string());
    }

    let forward_include = format!("#include \"{}\"", cfg.forward_header);
    let mut inserted_forward = false;
    if !changes.is_empty() && !content.contains(&forward_include) {
        let at = insertion_point(&new_lines);
        new_lines.insert(at, String::new());
        new_lines.insert(at + 1, forward_include);
        inserted_forward = true;
    }

    RewritePlan {
        new_text: new_lines.join("\n"),
        changes,
        kept,
        inserted_forward,
    }
}

/// Whole-file overwrite through a sibling temp file so a crash mid-write
/// cannot leave a half-written header behind.
fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "header".to_string());
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));
    fs::write(&tmp, text).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Rewrite one header file. In dry-run mode the new text is computed but
/// never persisted; in apply mode it is written back only when it differs
/// from the original, leaving timestamps alone otherwise.
pub fn process_file(path: &Path, cfg: &FwdConfig, apply: bool) -> Result<FileReport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let plan = plan_rewrite(&content, cfg);

    let outcome = if plan.new_text == content {
        FileOutcome::Unchanged
    } else if apply {
        write_atomic(path, &plan.new_text)?;
        FileOutcome::Written
    } else {
        FileOutcome::DryReported
    };

    Ok(FileReport {
        path: path.to_path_buf(),
        changes: plan.changes,
        kept: plan.kept,
        inserted_forward: plan.inserted_forward,
        outcome,
    })
}
