use clap::{Parser, Subcommand};
use connhub_api::{handlers::AppState, ApiServer};
use connhub_config::{AppConfig, LoggingConfig};
use connhub_core::{ConnectorCatalog, ConnectorPatch, ConnectorRegistry, ConnectorStore};
use connhub_store::UnifiedConnectorStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "connhub")]
#[command(about = "Connector registry CLI", long_about = None)]
struct Cli {
    /// Path to configuration directory
    #[arg(short, long, global = true, default_value = "config")]
    config_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed missing connectors and serve the HTTP API
    Serve,

    /// Seed a row for every catalog connector missing from storage
    Init,

    /// List connector instances in storage order
    List,

    /// Check configuration, catalog and stored rows for drift
    Validate,

    /// Enable a connector
    Enable { id: String },

    /// Disable a connector
    Disable { id: String },
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

fn load_catalog(config: &AppConfig) -> anyhow::Result<ConnectorCatalog> {
    match &config.catalog.path {
        Some(path) => {
            let catalog = ConnectorCatalog::load(path)?;
            info!("Loaded {} connector definition(s) from {}", catalog.len(), path);
            Ok(catalog)
        }
        None => Ok(ConnectorCatalog::builtin()),
    }
}

async fn open_registry(config: &AppConfig) -> anyhow::Result<ConnectorRegistry> {
    let catalog = Arc::new(load_catalog(config)?);
    let store = UnifiedConnectorStore::from_config(&config.storage).await?;
    info!("Connector storage: {}", store.backend_name());

    Ok(ConnectorRegistry::new(catalog, Arc::new(store)))
}

async fn set_enabled(registry: &ConnectorRegistry, id: &str, enabled: bool) -> anyhow::Result<()> {
    let instance = registry
        .update_connector(id, &ConnectorPatch::enabled(enabled))
        .await?;
    let state = if instance.is_enabled() { "enabled" } else { "disabled" };
    println!("✓ {} {}", instance.id(), state);
    Ok(())
}

/// Run the server until it fails or ctrl-c arrives; server failures are returned
async fn serve_until_shutdown(server: ApiServer) -> anyhow::Result<()> {
    tokio::select! {
        res = server.run() => {
            if let Err(e) = &res {
                error!("API server error: {:#}", e);
            }
            res
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down connector registry...");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let app_config = AppConfig::load(&cli.config_dir)?;
    init_tracing(&app_config.logging)?;

    match cli.command {
        Commands::Serve => {
            info!("Starting connector registry with config directory: {}", cli.config_dir);

            let registry = Arc::new(open_registry(&app_config).await?);

            // A failed bootstrap aborts startup
            let inserted = registry.init_connectors().await?;
            info!("Bootstrap inserted {} connector row(s)", inserted);

            let api = app_config.api.clone();
            let server = ApiServer::new(
                api.host.clone(),
                api.port,
                api.cors_enabled,
                AppState::new(registry),
            );

            info!("API server available at http://{}:{}", api.host, api.port);

            serve_until_shutdown(server).await?;
        }

        Commands::Init => {
            let registry = open_registry(&app_config).await?;
            let inserted = registry.init_connectors().await?;
            println!("✓ Inserted {} connector row(s)", inserted);
        }

        Commands::List => {
            let registry = open_registry(&app_config).await?;
            let instances = registry.get_connector_instances().await?;

            println!("📦 Connectors: {}", instances.len());
            for instance in &instances {
                let marker = if instance.is_enabled() { "🟢" } else { "⚪" };
                let platform = instance
                    .definition
                    .platform
                    .map(|p| format!(", {}", p))
                    .unwrap_or_default();
                println!(
                    "  {} {} ({}{})",
                    marker,
                    instance.id(),
                    instance.definition.connector_type,
                    platform
                );
            }
        }

        Commands::Validate => {
            let catalog = load_catalog(&app_config)?;
            println!("✓ Configuration is valid");
            println!("✓ Catalog: {} connector definition(s)", catalog.len());

            let store = UnifiedConnectorStore::from_config(&app_config.storage).await?;
            let rows = store.find_all().await?;
            println!("✓ Storage ({}): {} row(s)", store.backend_name(), rows.len());

            let stored: HashSet<&str> = rows.iter().map(|r| r.id.as_str()).collect();
            let mut drift = 0;

            for row in &rows {
                if catalog.find(&row.id).is_none() {
                    warn!("Stored connector '{}' has no catalog definition", row.id);
                    println!("  ✗ {} is stored but not in the catalog", row.id);
                    drift += 1;
                }
            }
            for id in catalog.ids() {
                if !stored.contains(id) {
                    warn!("Catalog connector '{}' has no stored row", id);
                    println!("  ✗ {} has no stored row (run `init`)", id);
                    drift += 1;
                }
            }

            if drift > 0 {
                anyhow::bail!(
                    "{} connector(s) out of sync between catalog and storage",
                    drift
                );
            }
        }

        Commands::Enable { id } => {
            let registry = open_registry(&app_config).await?;
            set_enabled(&registry, &id, true).await?;
        }

        Commands::Disable { id } => {
            let registry = open_registry(&app_config).await?;
            set_enabled(&registry, &id, false).await?;
        }
    }

    Ok(())
}
