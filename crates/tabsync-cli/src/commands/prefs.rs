//! Stored preference inspection

use colored::Colorize;
use tabsync_core::StoredPreference;
use tabsync_store::read_json;

use crate::context::Context;
use crate::error::Result;

pub fn run_prefs(context: &Context, json: bool) -> Result<()> {
    let store = context.store();
    let key = &context.config.cookie_name;
    let stored: Option<StoredPreference> = read_json(&store, key);

    if json {
        println!("{}", serde_json::to_string_pretty(&stored)?);
        return Ok(());
    }

    let Some(stored) = stored else {
        println!("{}", "No stored preference.".dimmed());
        return Ok(());
    };

    match stored {
        StoredPreference::BySupergroup(map) => {
            for (supergroup, group) in map {
                println!("{} = {}", supergroup.cyan().bold(), group.green());
            }
        }
        StoredPreference::Priority(list) => {
            println!("{} {}", "Priority list:".yellow(), list.join(", "));
        }
    }

    if let Some((_, entry)) = store.entries().into_iter().find(|(k, _)| k == key) {
        println!("{} {}", "Expires:".dimmed(), entry.expires.to_rfc2822());
    }
    Ok(())
}
