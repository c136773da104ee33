use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use url::Url;

use celebrations::{CelebrationEngine, CelebrationPublisher, CelebrationsConfig};
use runtime::{AppConfig, CliArgs, DatabaseConfig, StorageBackend};
use shopping_list::domain::{ItemsRepository, Service};
use shopping_list::infra::storage::{
    FileRepository, MemoryRepository, Migrator, SeaOrmItemsRepository,
};

mod http;
mod request_id;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Pantry Server - a self-hosted shopping list
#[derive(Parser)]
#[command(name = "pantry-server")]
#[command(about = "Pantry Server - a self-hosted shopping list")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use the throwaway in-memory storage backend
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config
        .logging
        .clone()
        .unwrap_or_else(runtime::default_logging_config);
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Pantry Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let repo = build_repository(&config).await?;

    let celebrations_config: CelebrationsConfig = config.module_config("celebrations");
    let engine = CelebrationEngine::new(celebrations_config);
    let publisher = Arc::new(CelebrationPublisher::new(Arc::clone(&engine)));
    let service = Arc::new(Service::new(repo, publisher));

    let router = http::build_router(service, engine, &config);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
            .await
            .with_context(|| {
                format!(
                    "Failed to bind {}:{}",
                    config.server.host, config.server.port
                )
            })?;
    let addr = listener.local_addr()?;
    tracing::info!("Pantry Server listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = runtime::wait_for_shutdown().await {
                tracing::error!("Shutdown signal handler failed: {e}");
            }
            tracing::info!("Shutting down gracefully");
        })
        .await?;

    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration");

    if config.storage.backend == StorageBackend::Database {
        let db_config = config
            .storage
            .database
            .as_ref()
            .ok_or_else(|| anyhow!("storage.backend = database requires a storage.database section"))?;
        detect_from_dsn(db_config)?;
    }

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

/// Build the repository the `storage` section selects.
async fn build_repository(config: &AppConfig) -> Result<Arc<dyn ItemsRepository>> {
    let home_dir = PathBuf::from(&config.server.home_dir);

    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory item storage");
            Ok(Arc::new(MemoryRepository::new()))
        }
        StorageBackend::File => {
            let raw = Path::new(&config.storage.file.path);
            let path = if raw.is_absolute() {
                raw.to_path_buf()
            } else {
                home_dir.join(raw)
            };
            tracing::info!("Using file item storage at {}", path.display());
            let repo = FileRepository::load(path).await?;
            Ok(Arc::new(repo))
        }
        StorageBackend::Database => {
            let db_config = config.storage.database.as_ref().ok_or_else(|| {
                anyhow!("storage.backend = database requires a storage.database section")
            })?;
            let db = connect_database(db_config, &home_dir).await?;
            Migrator::up(&db, None)
                .await
                .context("Database migration failed")?;
            Ok(Arc::new(SeaOrmItemsRepository::new(db)))
        }
    }
}

async fn connect_database(cfg: &DatabaseConfig, base_dir: &Path) -> Result<DatabaseConnection> {
    let backend = detect_from_dsn(cfg)?;
    let sqlite = backend == "sqlite";

    let mut dsn = cfg.url.trim().to_owned();
    if sqlite {
        dsn = absolutize_sqlite_dsn(&dsn, base_dir, true)?;
    }

    let mut opts = ConnectOptions::new(dsn.clone());
    // SQLite gets a single pooled connection: one writer, and session
    // pragmas apply to the connection that does the work.
    let max_conns = if sqlite {
        1
    } else {
        cfg.max_conns.unwrap_or(10)
    };
    opts.max_connections(max_conns)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    tracing::info!("Connecting to database: {}", dsn);
    let db = Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to {dsn}"))?;

    if sqlite {
        let busy_ms = cfg.busy_timeout_ms.unwrap_or(5000);
        db.execute_unprepared(&format!("PRAGMA busy_timeout = {busy_ms}"))
            .await
            .context("Failed to set sqlite busy_timeout")?;
    }

    Ok(db)
}

/// Detect the database backend from the URL scheme.
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    // Rebuild DSN with absolute path and normalized slashes
    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}
