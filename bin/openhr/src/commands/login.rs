//! Login / logout commands.

use std::path::Path;

use anyhow::Result;

use crate::commands::session::Session;
use crate::config::ClientConfig;

/// Login to the current context's server and persist the token pair.
pub async fn login(email: &str, password: &str, client_config_path: &Path) -> Result<()> {
    let session = Session::open(client_config_path)?;

    session
        .client
        .login(email, password)
        .await
        .map_err(|e| anyhow::anyhow!("Login failed: {}", e))?;
    session.persist_tokens()?;

    println!("Logged in as {}.", email);
    Ok(())
}

/// Logout — clear tokens from the current context.
pub fn logout(client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    let current_name = config.current_context.clone();
    if current_name.is_empty() {
        anyhow::bail!("No current context.");
    }

    let ctx = config
        .get_mut(&current_name)
        .ok_or_else(|| anyhow::anyhow!("Current context not found."))?;

    ctx.access_token = String::new();
    ctx.refresh_token = String::new();
    config.save(client_config_path)?;
    println!("Logged out from context \"{}\".", current_name);
    Ok(())
}
