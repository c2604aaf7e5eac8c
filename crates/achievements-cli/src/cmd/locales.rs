use crate::output::{print_json, print_table};
use achievements_core::locale::{LOCALE_ALIASES, SUPPORTED_LOCALES};
use anyhow::Result;
use serde_json::json;

pub fn run(json: bool) -> Result<()> {
    if json {
        let aliases: serde_json::Map<String, serde_json::Value> = LOCALE_ALIASES
            .iter()
            .map(|(from, to)| (from.to_string(), json!(to)))
            .collect();
        return print_json(&json!({
            "supported": SUPPORTED_LOCALES,
            "aliases": aliases,
        }));
    }

    println!("Supported locales:");
    for chunk in SUPPORTED_LOCALES.chunks(8) {
        println!("  {}", chunk.join(", "));
    }
    println!();
    println!("Aliases:");
    let rows: Vec<Vec<String>> = LOCALE_ALIASES
        .iter()
        .map(|(from, to)| vec![from.to_string(), to.to_string()])
        .collect();
    print_table(&["INPUT", "SENT AS"], &rows);
    Ok(())
}
