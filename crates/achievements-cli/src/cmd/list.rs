use crate::cmd::{block_on, Session};
use crate::output::{count, print_json, print_table};
use achievements_core::{RemoteAchievementRef, LIST_LIMIT};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(config_path: &Path, json: bool) -> Result<()> {
    let session = Session::open(config_path)?;
    let listed = block_on(session.deleter().list_all())?.context("failed to list achievements")?;

    if json {
        return print_json(&listed);
    }

    if listed.is_empty() {
        println!("No achievements.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = listed.iter().map(row).collect();
    print_table(&["ID", "VENDOR ID", "NAME", "POINTS"], &rows);
    println!();
    if listed.len() == LIST_LIMIT {
        println!("{} (listing cap reached)", count(listed.len(), "achievement"));
    } else {
        println!("{}", count(listed.len(), "achievement"));
    }
    Ok(())
}

fn row(r: &RemoteAchievementRef) -> Vec<String> {
    vec![
        r.id.clone(),
        r.vendor_identifier.clone().unwrap_or_else(|| "-".into()),
        r.reference_name.clone().unwrap_or_else(|| "-".into()),
        r.points.map(|p| p.to_string()).unwrap_or_else(|| "-".into()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_attributes_render_as_dash() {
        assert_eq!(
            row(&RemoteAchievementRef::with_id("ach-9")),
            vec!["ach-9", "-", "-", "-"]
        );
    }
}
