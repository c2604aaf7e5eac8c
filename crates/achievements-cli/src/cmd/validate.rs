use crate::output::{count, print_json};
use achievements_core::batch_file::{lint_batch, load_batch, WarnLevel, MAX_TOTAL_POINTS};
use anyhow::{bail, Context, Result};
use serde_json::json;
use std::path::Path;

pub fn run(path: &Path, json: bool) -> Result<()> {
    let items = load_batch(path)
        .with_context(|| format!("failed to read batch file {}", path.display()))?;
    let findings = lint_batch(&items);
    let errors = findings
        .iter()
        .filter(|f| f.level == WarnLevel::Error)
        .count();
    let total_points: i64 = items.iter().map(|i| i.points).sum();

    if json {
        print_json(&json!({
            "achievements": items.len(),
            "totalPoints": total_points,
            "findings": findings,
        }))?;
    } else {
        for f in &findings {
            let tag = match f.level {
                WarnLevel::Error => "error",
                WarnLevel::Warning => "warning",
            };
            println!("{tag}: {}", f.message);
        }
        if !findings.is_empty() {
            println!();
        }
        println!(
            "{}, {total_points}/{MAX_TOTAL_POINTS} points",
            count(items.len(), "achievement")
        );
    }

    if errors > 0 {
        bail!("{} in {}", count(errors, "error"), path.display());
    }
    Ok(())
}
