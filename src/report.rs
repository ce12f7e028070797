//! Console summaries for a finished run.

use langstrip_remux::{BatchReport, Job, ToolCommand, ToolInfo};
use std::fmt::Write;

/// Completion summary listing processed and failed files.
pub fn summary(report: &BatchReport) -> String {
    let mut out = String::new();

    if report.processed.is_empty() && report.failed.is_empty() {
        let _ = writeln!(out, "No matching files in {}", report.directory.display());
    }

    if !report.processed.is_empty() {
        let _ = writeln!(out, "Processed {} file(s):", report.processed.len());
        for path in &report.processed {
            let _ = writeln!(out, "  ✓ {}", path.display());
        }
    }

    if !report.failed.is_empty() {
        let _ = writeln!(out, "Failed {} file(s):", report.failed.len());
        for failure in &report.failed {
            let _ = writeln!(out, "  ✗ {}: {}", failure.path.display(), failure.error);
        }
    }

    if report.is_success() {
        out.push_str("Finished processing all files in the directory.");
    } else {
        out.push_str("Finished with errors.");
    }
    out
}

/// Listing of the commands a dry run would execute.
pub fn dry_run(plan: &[(Job, ToolCommand)]) -> String {
    let mut out = String::new();
    for (job, cmd) in plan {
        let _ = writeln!(out, "{}", job.input.display());
        let _ = writeln!(out, "  {}", cmd.display());
    }
    let _ = write!(out, "[DRY RUN] Would process {} file(s)", plan.len());
    out
}

/// One-line availability report for the remuxer.
pub fn tool_status(info: &ToolInfo) -> String {
    let mut out = format!(
        "{} {}",
        if info.available { "✓" } else { "✗" },
        info.name
    );
    if let Some(ref version) = info.version {
        let _ = write!(out, " ({})", version);
    }
    if let Some(ref path) = info.path {
        let _ = write!(out, " - {}", path.display());
    }
    out
}
