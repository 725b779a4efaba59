//! # hdrfwd - Forward-Declaration Converter for C++ Headers
//!
//! hdrfwd (binary: `fwd`) scans a firmware project's header tree and
//! rewrites `#include` directives into forward declarations wherever a
//! class is only ever used through pointers or references. Commenting out a
//! heavyweight include can cut rebuild times drastically on embedded
//! targets.
//!
//! ## Safety Model
//!
//! - **Dry run by default**: nothing touches the disk without `--apply`.
//! - **Conservative heuristics**: any by-value, template or base-class
//!   usage keeps the real include. False negatives are fine; a rewrite
//!   that breaks compilation is not.
//! - **Idempotent**: converted includes are commented out, so a second
//!   pass finds nothing left to convert.
//!
//! ## Quick Start
//!
//! ```bash
//! # Report what would change
//! fwd
//!
//! # Rewrite the headers in place
//! fwd --apply
//! ```
//!
//! ## Module Organization
//!
//! - [`classify`] - usage analysis (pointer/reference vs. full definition)
//! - [`rewrite`] - per-file include rewriting
//! - [`walker`] - directory traversal and run reporting
//! - [`config`] - allow-list and scan configuration (`fwd.toml`)

/// Usage classification for forward-declaration candidates.
pub mod classify;

/// Run configuration (`fwd.toml`): allow-list, exclusions, directories.
pub mod config;

/// Parallel build-job tuning for the host machine.
pub mod jobs;

/// Include rewriting for a single header file.
pub mod rewrite;

/// Terminal UI utilities (tables, colors).
pub mod ui;

/// Directory walking and run reporting.
pub mod walker;
