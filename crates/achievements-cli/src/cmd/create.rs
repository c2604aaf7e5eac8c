use crate::cmd::{block_on, Session};
use crate::output::{count, print_json};
use achievements_core::{DesiredAchievement, DesiredLocalization, Resolution};
use anyhow::{bail, Context, Result};
use serde_json::json;
use std::path::Path;

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Reference name, also used as the localized name
    #[arg(long)]
    pub name: String,

    /// Stable per-app key
    #[arg(long = "vendor-id")]
    pub vendor_id: String,

    #[arg(long)]
    pub points: i64,

    /// Hide the achievement until it is earned
    #[arg(long)]
    pub secret: bool,

    /// Allow earning more than once
    #[arg(long)]
    pub repeatable: bool,

    #[arg(long, default_value = "en-US")]
    pub locale: String,

    /// Defaults to the name
    #[arg(long)]
    pub before_description: Option<String>,

    /// Defaults to the name
    #[arg(long)]
    pub after_description: Option<String>,
}

impl CreateArgs {
    fn into_desired(self) -> DesiredAchievement {
        let before = self.before_description.unwrap_or_else(|| self.name.clone());
        let after = self.after_description.unwrap_or_else(|| self.name.clone());
        DesiredAchievement {
            localizations: vec![DesiredLocalization {
                locale: self.locale,
                name: self.name.clone(),
                before_description: before,
                after_description: after,
            }],
            name: self.name,
            vendor_identifier: self.vendor_id,
            points: self.points,
            is_secret: self.secret,
            can_repeat: self.repeatable,
        }
    }
}

pub fn run(config_path: &Path, args: CreateArgs, json: bool) -> Result<()> {
    let desired = args.into_desired();
    let session = Session::open(config_path)?;
    let reconciler = session.reconciler();

    let reconciled = block_on(reconciler.reconcile(&desired))?
        .with_context(|| format!("failed to create '{}'", desired.vendor_identifier))?;

    let achievement = &reconciled.achievement;
    let loc = &reconciled.localizations;

    if json {
        print_json(&json!({
            "id": achievement.id(),
            "vendorIdentifier": desired.vendor_identifier,
            "resolution": achievement.resolution(),
            "localizations": loc,
        }))?;
    } else {
        let verb = match achievement.resolution() {
            Resolution::Created => "Created",
            Resolution::Existing => "Adopted existing",
        };
        println!(
            "{verb} {} ({}), {} added, {} skipped",
            achievement.id(),
            desired.vendor_identifier,
            count(loc.succeeded, "localization"),
            loc.skipped
        );
        for f in &loc.failures {
            println!("  ! {}: {}", f.locale, f.message);
        }
    }

    if loc.failed > 0 {
        bail!("{} could not be added", count(loc.failed, "localization"));
    }
    Ok(())
}
