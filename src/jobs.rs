//! Parallel build-job tuning for the host machine.
//!
//! Windows builds get flaky when every core is saturated, so the
//! recommendation there is capped at 75% of the logical cores (minimum 1).
//! Everything else uses all cores.

use anyhow::Result;
use colored::*;

/// Apply the job-count policy to a core count.
fn cap_jobs(cores: usize, conservative: bool) -> usize {
    if conservative {
        std::cmp::max(1, cores * 3 / 4)
    } else {
        cores
    }
}

/// Recommended parallel job count for this host.
pub fn recommended_jobs() -> usize {
    cap_jobs(num_cpus::get(), cfg!(windows))
}

/// Print the recommendation, plus the Windows long-path hint. A process
/// cannot change its parent shell's environment, so the variable is printed
/// for the caller to export rather than set here.
pub fn print_jobs() -> Result<()> {
    let cores = num_cpus::get();
    let jobs = recommended_jobs();

    println!(
        "Building with {} parallel jobs (CPU cores: {})",
        jobs.to_string().bold().green(),
        cores
    );

    if cfg!(windows) {
        println!(
            "{} Windows detected: capped at 75% of cores for stability.",
            "!".yellow()
        );
        println!(
            "   Export {} to enable long path support.",
            "PLATFORMIO_BUILD_FLAGS=\"-D LONG_PATH_SUPPORT\"".cyan()
        );
    }

    Ok(())
}
