// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! QCI client command line.
//!
//! Exercises the client layer outside the browser: resolves paths through
//! the router, normalizes polygon files and inspects the stored session.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qci_client::{
    config::Config,
    db::FileStore,
    models::AuthUser,
    routes::Navigation,
    services::geo::{to_legacy_polygon_coords, to_polygon_feature_from_any},
    App,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "qci-client", version, about = "QCI client routing and geometry tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Navigate to each path in turn and print the outcome.
    Route {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Normalize the polygon in a JSON file and print it as a GeoJSON Feature.
    Geo {
        file: PathBuf,

        /// Print the legacy ring list instead of a Feature.
        #[arg(long)]
        legacy: bool,
    },

    /// Show or change the stored session.
    Session {
        #[command(subcommand)]
        action: Option<SessionAction>,
    },
}

#[derive(Subcommand, Debug)]
enum SessionAction {
    /// Store a token (and optional display name).
    Set {
        token: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove the stored session.
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(
        api_base = %config.api_base,
        session_file = %config.session_file.display(),
        "Configuration loaded"
    );

    let storage = Arc::new(FileStore::new(&config.session_file));
    let app = App::new(config, storage).context("Failed to initialize client")?;

    let output = match cli.command {
        Commands::Route { paths } => route(&app, &paths),
        Commands::Geo { file, legacy } => geo(&file, legacy)?,
        Commands::Session { action } => session(&app, action),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn route(app: &App, paths: &[String]) -> Value {
    let results: Vec<Value> = paths
        .iter()
        .map(|path| match app.router.navigate(path) {
            Navigation::Routed(state) => json!({
                "href": path,
                "outcome": "routed",
                "state": state,
            }),
            Navigation::Blocked(name) => json!({
                "href": path,
                "outcome": "blocked",
                "route": name,
                "toast": app.toaster.toasts().last(),
            }),
            Navigation::NotFound => json!({
                "href": path,
                "outcome": "not-found",
            }),
        })
        .collect();
    Value::Array(results)
}

fn geo(file: &Path, legacy: bool) -> Result<Value> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let input: Value =
        serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", file.display()))?;

    if legacy {
        return Ok(serde_json::to_value(to_legacy_polygon_coords(&input))?);
    }

    let feature = to_polygon_feature_from_any(&input, Default::default());
    if feature.is_none() {
        tracing::warn!(file = %file.display(), "No polygon found");
    }
    Ok(serde_json::to_value(feature)?)
}

fn session(app: &App, action: Option<SessionAction>) -> Value {
    match action {
        Some(SessionAction::Set { token, name }) => {
            let user = name.map(|name| AuthUser {
                name: Some(name),
                ..Default::default()
            });
            app.session.set_session(token, user);
        }
        Some(SessionAction::Clear) => app.session.clear_session(),
        None => {}
    }

    let current = app.session.current();
    json!({
        "authenticated": app.session.is_authenticated(),
        "user": current.and_then(|s| s.user),
    })
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qci_client=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
