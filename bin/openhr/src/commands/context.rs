//! Context subcommands: create, list, set, delete, use.

use std::path::Path;

use anyhow::Result;

use crate::config::{ClientConfig, Context};

pub fn create(name: &str, server: &str, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    if config.get_mut(name).is_some() {
        anyhow::bail!("Context \"{}\" already exists.", name);
    }

    config.upsert_context(Context {
        name: name.to_string(),
        server: server.trim_end_matches('/').to_string(),
        access_token: String::new(),
        refresh_token: String::new(),
    });
    if config.current_context.is_empty() {
        config.current_context = name.to_string();
    }
    config.save(client_config_path)?;

    println!("Context \"{}\" created.", name);
    Ok(())
}

pub fn list(client_config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(client_config_path)?;

    if config.contexts.is_empty() {
        println!("No contexts configured. Run `openhr context create <name> --server <url>`.");
        return Ok(());
    }

    for ctx in &config.contexts {
        let marker = if ctx.name == config.current_context { "*" } else { " " };
        let auth = if ctx.access_token.is_empty() { "" } else { " (logged in)" };
        println!("{} {}\t{}{}", marker, ctx.name, ctx.server, auth);
    }
    Ok(())
}

pub fn set(name: &str, server: Option<&str>, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;
    let ctx = config
        .get_mut(name)
        .ok_or_else(|| anyhow::anyhow!("Context \"{}\" not found.", name))?;

    if let Some(server) = server {
        ctx.server = server.trim_end_matches('/').to_string();
    }
    config.save(client_config_path)?;
    println!("Context \"{}\" updated.", name);
    Ok(())
}

pub fn delete(name: &str, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;
    if !config.remove_context(name) {
        anyhow::bail!("Context \"{}\" not found.", name);
    }
    config.save(client_config_path)?;
    println!("Context \"{}\" deleted.", name);
    Ok(())
}

pub fn use_context(name: &str, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;
    if config.get_mut(name).is_none() {
        anyhow::bail!("Context \"{}\" not found.", name);
    }
    config.current_context = name.to_string();
    config.save(client_config_path)?;
    println!("Switched to context \"{}\".", name);
    Ok(())
}
