use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use applications_dashboard::config::Config;
use applications_dashboard::dashboard::{
    self, view, DashboardApp, DashboardController, LogPanelLayer,
};
use applications_dashboard::http_client::ApplicationsClient;
use applications_dashboard::storage::HiddenIdStore;

use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (for log level)
    let config = Config::load()?;
    config.validate()?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.to_lowercase()));

    let log_buffer = Arc::new(Mutex::new(VecDeque::new()));

    if config.snapshot {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        // The terminal belongs to the dashboard, so logs go to its panel
        tracing_subscriber::registry()
            .with(env_filter)
            .with(LogPanelLayer::new(Arc::clone(&log_buffer)))
            .init();
    }

    tracing::info!("Applications Dashboard {} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        api_url = %config.api_url,
        store = %config.store_file.display(),
        "Configuration loaded"
    );

    let client = ApplicationsClient::new(
        &config.api_url,
        config.http_connect_timeout,
        config.http_request_timeout,
    )?;
    let store = HiddenIdStore::open(&config.store_file)
        .with_context(|| format!("Failed to open store {}", config.store_file.display()))?;

    let mut controller = DashboardController::new(client, store);

    // Failures are logged by the controller; the dashboard starts empty
    let _ = controller.load().await;

    if config.snapshot {
        let rows = view::rows(controller.state());
        print!("{}", view::render_text_table(&rows));
        return Ok(());
    }

    let app = DashboardApp::new(controller, log_buffer);
    run_dashboard(app).await
}

/// Draw, read one key, run its command; repeat until quit
async fn run_dashboard(mut app: DashboardApp) -> Result<()> {
    let mut terminal = ratatui::init();
    app.clamp_selection();

    let result = async {
        loop {
            terminal.draw(|frame| dashboard::ui::render(frame, &mut app))?;

            if let Some(command) = dashboard::handle_events(&mut app)? {
                app.dispatch(command).await;
            }

            if app.should_quit {
                break;
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    ratatui::restore();
    tracing::info!("Dashboard closed");
    result
}
