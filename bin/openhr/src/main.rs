//! `openhr` — the OpenHR CLI client.
//!
//! Manages contexts, authentication, and resource operations against an
//! OpenHR deployment. Think of it as `kubectl` for the HR portal.

mod commands;
mod config;
mod table;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use openhr_core::Scope;

/// OpenHR CLI tool.
#[derive(Parser, Debug)]
#[command(name = "openhr", about = "OpenHR CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.openhr/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Context management.
    #[command(name = "context")]
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Switch the current context.
    #[command(name = "use")]
    Use {
        #[command(subcommand)]
        what: UseWhat,
    },

    /// Login to the current context's server.
    Login {
        /// Email address.
        #[arg(long)]
        user: Option<String>,
        /// Password (not recommended — use interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Logout — clear tokens from current context.
    Logout,

    /// Get resource(s).
    Get {
        /// Resource type (e.g. countries, cities, roles, candidates).
        resource: String,
        /// Optional resource ID for single get.
        id: Option<String>,
        /// Client-side search over the resource's searchable fields.
        #[arg(long)]
        search: Option<String>,
        /// Categorical filter, repeatable (e.g. --filter isActive=true).
        #[arg(long = "filter")]
        filters: Vec<String>,
        /// Page number.
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Page size.
        #[arg(long = "per-page", default_value_t = 50)]
        per_page: usize,
    },

    /// Create a resource.
    Create {
        /// Resource type.
        resource: String,
        /// JSON draft body.
        #[arg(long = "json")]
        json_body: Option<String>,
        /// Read JSON draft from file.
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },

    /// Update a resource (merge over the current record).
    Update {
        /// Resource type.
        resource: String,
        /// Resource ID.
        id: String,
        /// JSON body, merged over the record's current fields.
        #[arg(long = "json")]
        json_body: String,
    },

    /// Delete a resource.
    Delete {
        /// Resource type.
        resource: String,
        /// Resource ID.
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Show the current actor's permission set.
    Permissions {
        /// Portal scope: org or admin.
        #[arg(long, default_value = "org")]
        scope: String,
    },

    /// Check server status.
    Status,

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// Create a new context.
    Create {
        /// Context name.
        name: String,
        /// Server URL.
        #[arg(long)]
        server: String,
    },
    /// List all contexts.
    List,
    /// Set properties on a context.
    Set {
        name: String,
        #[arg(long)]
        server: Option<String>,
    },
    /// Delete a context.
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum UseWhat {
    /// Switch to a context.
    Context { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);
    let json_output = cli.output == "json";

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::Create { name, server } => {
                commands::context::create(&name, &server, &config_path)?;
            }
            ContextAction::List => {
                commands::context::list(&config_path)?;
            }
            ContextAction::Set { name, server } => {
                commands::context::set(&name, server.as_deref(), &config_path)?;
            }
            ContextAction::Delete { name } => {
                commands::context::delete(&name, &config_path)?;
            }
        },

        Commands::Use { what } => match what {
            UseWhat::Context { name } => {
                commands::context::use_context(&name, &config_path)?;
            }
        },

        Commands::Login { user, password } => {
            let email = user.unwrap_or_else(|| {
                eprint!("Email: ");
                let mut s = String::new();
                std::io::stdin().read_line(&mut s).unwrap_or_default();
                s.trim().to_string()
            });
            let password = password.unwrap_or_else(|| {
                rpassword::prompt_password("Password: ").unwrap_or_default()
            });
            commands::login::login(&email, &password, &config_path).await?;
        }

        Commands::Logout => {
            commands::login::logout(&config_path)?;
        }

        Commands::Get {
            resource,
            id,
            search,
            filters,
            page,
            per_page,
        } => {
            let opts = commands::resource::ListOpts {
                search,
                filters: commands::resource::parse_filters(&filters)?,
                page,
                per_page,
                json: json_output,
            };
            match id {
                Some(id) => commands::resource::get(&resource, &id, &config_path).await?,
                None => commands::resource::list(&resource, &opts, &config_path).await?,
            }
        }

        Commands::Create {
            resource,
            json_body,
            file,
        } => {
            let body = if let Some(path) = file {
                std::fs::read_to_string(&path)?
            } else if let Some(json) = json_body {
                json
            } else {
                anyhow::bail!("Provide --json or -f <file>.");
            };
            commands::resource::create(&resource, &body, &config_path).await?;
        }

        Commands::Update {
            resource,
            id,
            json_body,
        } => {
            commands::resource::update(&resource, &id, &json_body, &config_path).await?;
        }

        Commands::Delete { resource, id, yes } => {
            if !yes {
                eprint!("Are you sure? [y/N]: ");
                let mut s = String::new();
                std::io::stdin().read_line(&mut s).unwrap_or_default();
                if !s.trim().eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            commands::resource::delete(&resource, &id, &config_path).await?;
        }

        Commands::Permissions { scope } => {
            let scope = match scope.as_str() {
                "org" => Scope::Org,
                "admin" => Scope::Admin,
                other => anyhow::bail!("Unknown scope: {} (expected org or admin)", other),
            };
            commands::permissions::show(scope, json_output, &config_path).await?;
        }

        Commands::Status => {
            commands::resource::status(&config_path).await?;
        }

        Commands::Version => {
            println!("openhr cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
