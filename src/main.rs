//! Orderflow CLI - create orders and drive them through their lifecycle

use anyhow::Context;
use clap::{Parser, Subcommand};
use orderflow::config::{OrderflowConfig, StoreConfig};
use orderflow::service::OrderService;
use orderflow::store::StoreFormat;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

/// Table file used when no store is configured.
const DEFAULT_STORE_PATH: &str = "orderflow.json";

/// Orderflow CLI
#[derive(Parser)]
#[command(name = "orderflow")]
#[command(about = "Track orders through their lifecycle", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "ORDERFLOW_CONFIG")]
    config: Option<String>,

    /// Log level (overrides the configuration file)
    #[arg(long, env = "ORDERFLOW_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an order in state `created`
    Create {
        /// Owning user
        #[arg(long)]
        user: i64,
    },

    /// Show one order
    Show { id: Uuid },

    /// List all orders
    List,

    /// Trigger an event (process, complete, fail, cancel) on an order
    Advance { id: Uuid, event: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    orderflow::logging::init(&config.logging);

    execute(cli.command, &config, &mut std::io::stdout().lock())
}

/// CLI defaults: orders persist to a JSON file in the working directory so
/// successive invocations see each other's writes.
fn cli_defaults() -> OrderflowConfig {
    OrderflowConfig {
        store: StoreConfig::File {
            path: PathBuf::from(DEFAULT_STORE_PATH),
            format: StoreFormat::Json,
        },
        ..OrderflowConfig::default()
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<OrderflowConfig> {
    let mut config = OrderflowConfig::load_with_defaults(&cli_defaults(), cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    Ok(config)
}

fn execute<W: Write>(
    command: Command,
    config: &OrderflowConfig,
    out: &mut W,
) -> anyhow::Result<()> {
    if config.store == StoreConfig::Memory {
        warn!("Memory store configured; orders are discarded when this command exits");
    }

    let service = OrderService::with_default_hooks(config.store.open())?;

    match command {
        Command::Create { user } => print_json(out, &service.create(user)?),
        Command::Show { id } => print_json(out, &service.get(id)?),
        Command::List => print_json(out, &service.list()?),
        Command::Advance { id, event } => print_json(out, &service.advance(id, &event)?),
    }
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow::order::{OrderError, OrderSnapshot};
    use std::path::Path;

    /// Write a config file pointing the store at `store` and return its path.
    fn config_file(dir: &Path, store: &Path) -> String {
        let path = dir.join("orderflow.toml");
        std::fs::write(
            &path,
            format!("[store]\ntype = \"file\"\npath = {:?}\n", store.display().to_string()),
        )
        .unwrap();
        path.to_str().unwrap().to_string()
    }

    /// Parse `args` and run them the way `main` does, returning stdout.
    fn run(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("orderflow").chain(args.iter().copied()))?;
        let config = load_config(&cli)?;
        let mut out = Vec::new();
        execute(cli.command, &config, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn default_store_is_a_json_file() {
        assert_eq!(
            cli_defaults().store,
            StoreConfig::File {
                path: PathBuf::from("orderflow.json"),
                format: StoreFormat::Json,
            }
        );
    }

    #[test]
    fn create_then_advance_across_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_file(dir.path(), &dir.path().join("orders.json"));

        let created: OrderSnapshot =
            serde_json::from_str(&run(&["--config", &config, "create", "--user", "7"]).unwrap())
                .unwrap();
        assert_eq!(created.state, "created");

        let id = created.id.to_string();
        let processed: OrderSnapshot =
            serde_json::from_str(&run(&["--config", &config, "advance", &id, "process"]).unwrap())
                .unwrap();
        assert_eq!(processed.id, created.id);
        assert_eq!(processed.state, "processing");

        let shown: OrderSnapshot =
            serde_json::from_str(&run(&["--config", &config, "show", &id]).unwrap()).unwrap();
        assert_eq!(shown.state, "processing");
        assert_eq!(shown.user_id, 7);

        let listed: Vec<OrderSnapshot> =
            serde_json::from_str(&run(&["--config", &config, "list"]).unwrap()).unwrap();
        assert_eq!(listed, vec![shown]);
    }

    #[test]
    fn illegal_event_surfaces_as_order_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_file(dir.path(), &dir.path().join("orders.json"));
        let created: OrderSnapshot =
            serde_json::from_str(&run(&["--config", &config, "create", "--user", "1"]).unwrap())
                .unwrap();

        let err = run(&["--config", &config, "advance", &created.id.to_string(), "complete"])
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<OrderError>().map(|e| e.to_string()),
            Some("Cannot transition from created using event complete".to_string())
        );
    }
}
