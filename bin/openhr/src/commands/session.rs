//! Authenticated session plumbing shared by the resource commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use openhr_client::{ApiClient, PermissionsApi, ResourceApi, SessionTokens};
use openhr_core::Resource;
use openhr_store::{Notifier, PermissionContext, ResourceStore};

use crate::config::ClientConfig;

/// Prints store notifications for a terminal user. Success lines go to
/// stdout; error reporting is left to the propagated `Result` so each
/// failure is printed exactly once.
pub struct CliNotifier;

impl Notifier for CliNotifier {
    fn success(&self, message: &str) {
        println!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::debug!(message, "operation failed");
    }
}

/// An API client bound to the current context.
pub struct Session {
    pub client: Arc<ApiClient>,
    config_path: PathBuf,
    context_name: String,
}

impl Session {
    /// Open a session against the current context. Fails when no context
    /// is selected or the context has no server URL.
    pub fn open(client_config_path: &Path) -> Result<Self> {
        let config = ClientConfig::load(client_config_path)?;
        let ctx = config
            .current()
            .ok_or_else(|| anyhow::anyhow!("No current context. Run `openhr use context <name>`."))?;

        if ctx.server.is_empty() {
            anyhow::bail!(
                "No server URL set for context \"{}\". Run `openhr context set {} --server <url>`.",
                ctx.name,
                ctx.name
            );
        }

        let tokens = if ctx.access_token.is_empty() {
            SessionTokens::new()
        } else {
            SessionTokens::with_tokens(&ctx.access_token, &ctx.refresh_token)
        };

        Ok(Self {
            client: Arc::new(ApiClient::new(&ctx.server, tokens)),
            config_path: client_config_path.to_path_buf(),
            context_name: ctx.name.clone(),
        })
    }

    /// Build a store for one resource type, with permissions resolved
    /// up front (fail closed before any fetch).
    pub async fn store<R: Resource>(&self) -> Arc<ResourceStore<R>> {
        let permissions = PermissionContext::new(
            Arc::clone(&self.client) as Arc<dyn PermissionsApi>,
            R::SCOPE,
        );
        permissions.resolve().await;

        Arc::new(ResourceStore::new(
            Arc::clone(&self.client) as Arc<dyn ResourceApi>,
            permissions,
            Arc::new(CliNotifier),
        ))
    }

    /// Write possibly-rotated tokens back to the context file. Called
    /// after every authenticated command so a mid-command refresh
    /// survives to the next invocation.
    pub fn persist_tokens(&self) -> Result<()> {
        let mut config = ClientConfig::load(&self.config_path)?;
        let Some(ctx) = config.get_mut(&self.context_name) else {
            return Ok(());
        };

        match (
            self.client.tokens().access_token(),
            self.client.tokens().refresh_token(),
        ) {
            (Some(access), Some(refresh)) => {
                if ctx.access_token != access || ctx.refresh_token != refresh {
                    ctx.access_token = access;
                    ctx.refresh_token = refresh;
                    config.save(&self.config_path)?;
                }
            }
            _ => {
                // Session was invalidated (failed refresh cleared it).
                if !ctx.access_token.is_empty() {
                    ctx.access_token = String::new();
                    ctx.refresh_token = String::new();
                    config.save(&self.config_path)?;
                }
            }
        }
        Ok(())
    }
}
