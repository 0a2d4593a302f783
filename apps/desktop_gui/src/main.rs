use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use backend_bridge::commands::BackendCommand;
use clap::Parser;
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::view::PageSize;
use table_core::{load_settings, CommentSource, HttpCommentSource};
use tracing_subscriber::EnvFilter;
use ui::{CommentTableApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(
    name = "comment-table-gui",
    about = "Desktop table over the comments collection"
)]
struct Args {
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Rows per page, or `all` / `-1`.
    #[arg(long, allow_hyphen_values = true)]
    page_size: Option<PageSize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint_url = endpoint;
    }
    let source: Arc<dyn CommentSource> = Arc::new(
        HttpCommentSource::new(&settings.endpoint_url)
            .with_context(|| format!("invalid endpoint '{}'", settings.endpoint_url))?,
    );
    let startup = StartupConfig {
        endpoint_url: settings.endpoint_url,
        page_size: args.page_size.unwrap_or(settings.page_size),
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let backend = backend_bridge::runtime::launch(source, cmd_rx, ui_tx);
    let shutdown_tx = cmd_tx.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Comment Table")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    let result = eframe::run_native(
        "Comment Table",
        options,
        Box::new(|_cc| Ok(Box::new(CommentTableApp::bootstrap(cmd_tx, ui_rx, startup)))),
    );

    let _ = shutdown_tx.send(BackendCommand::Shutdown);
    if backend.join().is_err() {
        tracing::warn!("backend worker panicked");
    }
    result.map_err(|err| anyhow!("desktop window failed: {err}"))
}
