use crate::cmd::{block_on, Session};
use crate::output::{count, print_json};
use achievements_core::{AchievementApi, DeleteOutcome};
use anyhow::{bail, Context, Result};
use serde_json::json;
use std::io::{BufRead, Write};
use std::path::Path;

const CONFIRM_WORD: &str = "DELETE";

pub fn run_one(config_path: &Path, id: &str, json: bool) -> Result<()> {
    let session = Session::open(config_path)?;
    block_on(session.client.delete_achievement(id))?
        .with_context(|| format!("failed to delete achievement {id}"))?;

    if json {
        print_json(&json!({ "deleted": id }))?;
    } else {
        println!("Deleted {id}");
    }
    Ok(())
}

pub fn run_all(config_path: &Path, yes: bool, json: bool) -> Result<()> {
    let session = Session::open(config_path)?;
    let deleter = session.deleter();

    let listed = block_on(deleter.list_all())?.context("failed to list achievements")?;
    if listed.is_empty() {
        if json {
            print_json(&DeleteOutcome::default())?;
        } else {
            println!("No achievements to delete.");
        }
        return Ok(());
    }

    if !yes && !confirm(listed.len())? {
        bail!("aborted; nothing was deleted");
    }

    let outcome = block_on(deleter.delete_all(&listed))?;

    if json {
        print_json(&outcome)?;
    } else {
        for f in &outcome.failures {
            let name = f.reference_name.as_deref().unwrap_or("-");
            println!("  ! {} ({name}): {}", f.id, f.message);
        }
        println!(
            "Deleted {}, {} failed.",
            count(outcome.success_count, "achievement"),
            outcome.fail_count
        );
    }

    if outcome.fail_count > 0 {
        bail!("{} could not be deleted", count(outcome.fail_count, "achievement"));
    }
    Ok(())
}

fn confirm(n: usize) -> Result<bool> {
    let mut stderr = std::io::stderr();
    write!(
        stderr,
        "About to delete {}. This cannot be undone.\nType {CONFIRM_WORD} to continue: ",
        count(n, "achievement")
    )?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read confirmation")?;
    Ok(is_confirmed(&line))
}

fn is_confirmed(line: &str) -> bool {
    line.trim() == CONFIRM_WORD
}
