use clap::Parser;
use color_eyre::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use sysmon_tui::{
    api::http::HttpMetricsApi,
    app::{App, AppMode},
    cli::Cli,
    config::Config,
    logging::setup_logging,
    metrics::{poller::Poller, store::DashboardStore},
    tui::{
        event::{poll_event, Event},
        screens::dashboard::DashboardScreen,
        terminal,
    },
};
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let _log_guard = setup_logging(cli.verbose)?;

    let config = cli.apply(Config::resolve(cli.config.as_deref())?);
    config.validate()?;

    tracing::info!(
        base_url = %config.base_url,
        interval = %humantime::format_duration(config.refresh_interval),
        "starting dashboard"
    );

    let api = Arc::new(HttpMetricsApi::new(
        config.base_url.clone(),
        config.request_timeout,
    ));
    let store = Arc::new(RwLock::new(DashboardStore::new(config.history_size)));
    let poller = Arc::new(Poller::new(api, store.clone()));
    let mut app = App::new(poller, &config);

    app.start();
    if config.auto_refresh {
        app.toggle_auto_refresh();
    }

    let mut terminal = terminal::setup_terminal()?;
    let result = run(&mut terminal, &mut app, &store).await;

    app.quit();
    terminal::restore_terminal(&mut terminal)?;
    result
}

async fn run(
    terminal: &mut terminal::Tui,
    app: &mut App,
    store: &Arc<RwLock<DashboardStore>>,
) -> Result<()> {
    while !app.should_quit {
        app.drain_outcomes();
        app.expire_alert(Instant::now());

        let store_snapshot = {
            let store = store.read().await;
            store.clone()
        };

        terminal.draw(|frame| {
            DashboardScreen::render(frame, app, &store_snapshot);
        })?;

        let event = poll_event(Duration::from_millis(100))?;

        match app.mode {
            AppMode::Help => match event {
                Event::Help | Event::Cancel | Event::Quit => app.toggle_help(),
                _ => {}
            },
            AppMode::ConfirmClear => match event {
                Event::Confirm => app.confirm_clear(),
                Event::Cancel | Event::Quit => app.cancel_confirmation(),
                _ => {}
            },
            AppMode::Normal => match event {
                Event::Quit => app.quit(),
                Event::Help => app.toggle_help(),
                Event::Tab(index) => app.select_tab(index),
                Event::NextTab => app.next_tab(),
                Event::PrevTab => app.previous_tab(),
                Event::Down => app.scroll_down(),
                Event::Up => app.scroll_up(),
                Event::Refresh => app.refresh(),
                Event::ToggleAutoRefresh => {
                    app.toggle_auto_refresh();
                }
                Event::Clear => app.request_clear(),
                Event::Export => app.export().await,
                Event::CycleExportFormat => app.cycle_export_format(),
                Event::Confirm | Event::Cancel | Event::None => {}
            },
        }
    }

    Ok(())
}
