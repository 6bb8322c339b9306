mod api;
mod build_cmd;
mod parse_cmd;
mod table_cmd;
mod terminal_output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use qudom_config::defaults::{DEFAULT_BIND, DEFAULT_PORT};
use qudom_config::{config_dir, config_file_path, QudomConfig};
use qudom_logging::{init_logger, LoggingOptions};

use api::AppState;

#[derive(Parser)]
#[command(name = "qudom")]
#[command(about = "Build element trees from shorthand identifiers")]
#[command(version)]
struct Cli {
    /// Config file (YAML or TOML); defaults to the qudom config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one identifier and print its descriptor
    Parse {
        identifier: String,
        /// Reject ambiguous identifiers
        #[arg(long)]
        strict: bool,
        /// Print a table instead of JSON
        #[arg(long)]
        table: bool,
    },
    /// Build a tree spec (JSON or YAML) and print HTML
    Build {
        /// Tree spec file; stdin when omitted
        file: Option<PathBuf>,
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        max_depth: Option<usize>,
        /// Spaces per nesting level; 0 for compact output
        #[arg(long)]
        indent: Option<usize>,
        /// Leave out empty `class`, `style` and `id` attributes
        #[arg(long)]
        omit_empty_attributes: bool,
    },
    /// Render `{ "header": [...], "rows": [[...]] }` JSON as an HTML table
    Table {
        file: Option<PathBuf>,
        #[arg(long)]
        indent: Option<usize>,
    },
    /// Start the preview server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Tree spec file rendered at `/`
        #[arg(long)]
        page: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let prepared = qudom_config::load_and_prepare(&config_path).await?;
    let config = prepared.config;

    init_logger(&logging_options(&config)?)?;
    for warning in &prepared.warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }

    let mut options = config.build_options();

    match cli.command {
        Commands::Parse {
            identifier,
            strict,
            table,
        } => {
            options.strict |= strict;
            parse_cmd::run(&identifier, &options, table)?;
        }
        Commands::Build {
            file,
            strict,
            max_depth,
            indent,
            omit_empty_attributes,
        } => {
            options.strict |= strict;
            if let Some(max_depth) = max_depth {
                options.max_depth = max_depth;
            }
            let renderer = build_cmd::renderer(
                indent.unwrap_or(config.indent()),
                omit_empty_attributes || config.omit_empty_attributes(),
            );
            build_cmd::run(file, &options, &renderer).await?;
        }
        Commands::Table { file, indent } => {
            let renderer = build_cmd::renderer(
                indent.unwrap_or(config.indent()),
                config.omit_empty_attributes(),
            );
            table_cmd::run(file, &renderer).await?;
        }
        Commands::Serve { port, page } => {
            run_server(&config, port, page).await?;
        }
    }

    Ok(())
}

fn logging_options(config: &QudomConfig) -> Result<LoggingOptions> {
    Ok(LoggingOptions {
        level: config.log_level().to_string(),
        format: config.log_format().parse()?,
        dir: config.logging.as_ref().and_then(|l| l.dir.clone()),
    })
}

async fn run_server(config: &QudomConfig, port: Option<u16>, page: Option<PathBuf>) -> Result<()> {
    let server = config.server.clone().unwrap_or_default();
    let bind = server.bind.unwrap_or_else(|| DEFAULT_BIND.to_string());
    let port = port.or(server.port).unwrap_or(DEFAULT_PORT);

    let page = match page.or(server.page) {
        Some(path) => {
            let raw = build_cmd::read_input(Some(&path)).await?;
            build_cmd::parse_tree_spec(&raw, Some(&path))
                .with_context(|| format!("Invalid page: {}", path.display()))?
        }
        None => api::demo_page(),
    };

    let app_state = Arc::new(AppState {
        options: config.build_options(),
        renderer: build_cmd::renderer(config.indent(), config.omit_empty_attributes()),
        page,
    });

    let app = api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());
    let addr = format!("{bind}:{port}");

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(addr = %addr, "Preview server listening");
    terminal_output::note_info(&format!("Serving on http://{addr}"));

    axum::serve(listener, app).await?;

    Ok(())
}
