//! Show the current actor's resolved permission set.

use std::path::Path;

use anyhow::Result;

use openhr_core::{PermissionSet, Scope};

use crate::commands::session::Session;
use crate::table::print_table;

pub async fn show(scope: Scope, json: bool, config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;

    let grants = session.client.my_permissions(scope).await;
    session.persist_tokens()?;
    let grants = grants?;

    if json {
        println!("{}", serde_json::to_string_pretty(&grants)?);
        return Ok(());
    }

    if grants.is_empty() {
        println!("No permissions granted in the {} scope.", scope.as_path());
        return Ok(());
    }

    let set = PermissionSet::from_grants(grants);
    let rows: Vec<Vec<String>> = set
        .modules()
        .iter()
        .map(|module| {
            let guard = set.guard(module);
            let mut actions = Vec::new();
            if guard.can_read {
                actions.push("read");
            }
            if guard.can_write {
                actions.push("write");
            }
            if guard.can_update {
                actions.push("update");
            }
            if guard.can_delete {
                actions.push("delete");
            }
            vec![module.to_string(), actions.join(", ")]
        })
        .collect();

    print_table(&["MODULE", "ACTIONS"], &rows);
    Ok(())
}
