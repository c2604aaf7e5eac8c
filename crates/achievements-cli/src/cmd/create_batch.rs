use crate::cmd::{block_on, Session};
use crate::output::{count, print_json};
use achievements_core::batch_file::{lint_batch, load_batch, WarnLevel};
use achievements_core::{BatchOutcome, BatchRunner, ItemReport, ItemStatus};
use anyhow::{bail, Context, Result};
use std::path::Path;

pub fn run(config_path: &Path, batch_path: &Path, json: bool) -> Result<()> {
    let items = load_batch(batch_path)
        .with_context(|| format!("failed to read batch file {}", batch_path.display()))?;

    for finding in lint_batch(&items) {
        match finding.level {
            WarnLevel::Error => tracing::error!("{}", finding.message),
            WarnLevel::Warning => tracing::warn!("{}", finding.message),
        }
    }

    if items.is_empty() {
        println!("No achievements in {}.", batch_path.display());
        return Ok(());
    }

    let session = Session::open(config_path)?;
    let runner = BatchRunner::new(session.reconciler()).with_pacing(session.config.pacing());

    if !json {
        println!(
            "Creating {} for app {}",
            count(items.len(), "achievement"),
            session.config.app_id
        );
    }

    let outcome = block_on(runner.run_batch_with(&items, |report| {
        if !json {
            println!("{}", progress_line(report));
        }
    }))?;

    if json {
        print_json(&outcome)?;
    } else {
        println!();
        println!("{}", summary(&outcome));
    }

    if outcome.fail_count > 0 {
        bail!(
            "{} of {} failed",
            outcome.fail_count,
            count(items.len(), "achievement")
        );
    }
    Ok(())
}

fn progress_line(report: &ItemReport) -> String {
    let head = format!(
        "[{}/{}] {} ({})",
        report.index, report.total, report.name, report.vendor_identifier
    );
    let loc = &report.localizations;
    match &report.status {
        ItemStatus::Created { id } | ItemStatus::Existing { id } => {
            let verb = if matches!(report.status, ItemStatus::Created { .. }) {
                "created"
            } else {
                "exists"
            };
            let mut line = format!(
                "{head} ... {verb} {id}, {} added, {} skipped",
                count(loc.succeeded, "localization"),
                loc.skipped
            );
            for f in &loc.failures {
                line.push_str(&format!("\n    ! {}: {}", f.locale, f.message));
            }
            line
        }
        ItemStatus::Failed { reason } => format!("{head} ... FAILED: {reason}"),
    }
}

fn summary(outcome: &BatchOutcome) -> String {
    let mut s = format!(
        "Done: {} succeeded, {} failed. Localizations: {} added, {} skipped",
        outcome.success_count,
        outcome.fail_count,
        outcome.localization_success_count(),
        outcome.localization_skip_count(),
    );
    let lost = outcome.localization_fail_count();
    if lost > 0 {
        s.push_str(&format!(", {lost} failed"));
    }
    s.push('.');
    s
}
