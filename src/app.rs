use crate::config::Config;
use crate::export::{self, ExportFormat};
use crate::metrics::poller::{PollOutcome, Poller};
use crate::metrics::scheduler::{RefreshScheduler, RefreshState};
use crate::metrics::store::DashboardStore;
use crate::theme::Theme;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Processes,
    System,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Overview => Tab::Processes,
            Tab::Processes => Tab::System,
            Tab::System => Tab::Overview,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Tab::Overview => Tab::System,
            Tab::Processes => Tab::Overview,
            Tab::System => Tab::Processes,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Tab::Overview),
            1 => Some(Tab::Processes),
            2 => Some(Tab::System),
            _ => None,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Overview => "Overview",
            Tab::Processes => "Processes",
            Tab::System => "System",
        }
    }

    pub fn all() -> [Tab; 3] {
        [Tab::Overview, Tab::Processes, Tab::System]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Help,
    ConfirmClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub raised_at: Instant,
}

/// The dashboard controller. Owns the poller, the auto-refresh timer, and
/// all UI state; background calls report back over an outcome channel.
pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub mode: AppMode,
    pub scroll_offset: usize,
    pub theme: Theme,
    pub alert: Option<Alert>,
    pub export_format: ExportFormat,
    alert_ttl: Duration,
    export_dir: Option<String>,
    poller: Arc<Poller>,
    scheduler: RefreshScheduler,
    outcome_tx: UnboundedSender<PollOutcome>,
    outcome_rx: UnboundedReceiver<PollOutcome>,
}

impl App {
    pub fn new(poller: Arc<Poller>, config: &Config) -> Self {
        let (outcome_tx, outcome_rx) = unbounded_channel();

        Self {
            should_quit: false,
            current_tab: Tab::Overview,
            mode: AppMode::Normal,
            scroll_offset: 0,
            theme: Theme,
            alert: None,
            export_format: ExportFormat::Json,
            alert_ttl: config.alert_ttl,
            export_dir: config.export_dir.clone(),
            poller,
            scheduler: RefreshScheduler::new(config.refresh_interval),
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn store(&self) -> &Arc<RwLock<DashboardStore>> {
        self.poller.store()
    }

    pub fn is_loading(&self) -> bool {
        self.poller.in_flight() > 0
    }

    pub fn auto_refresh_state(&self) -> RefreshState {
        self.scheduler.state()
    }

    pub fn auto_refresh_label(&self) -> String {
        self.scheduler.status_label()
    }

    /// Initial load: one poll plus a health check.
    pub fn start(&mut self) {
        self.refresh();
        self.check_health();
    }

    pub fn refresh(&mut self) {
        self.poller.spawn_poll(self.outcome_tx.clone());
    }

    pub fn check_health(&mut self) {
        self.poller.spawn_health_check(self.outcome_tx.clone());
    }

    pub fn toggle_auto_refresh(&mut self) -> RefreshState {
        self.scheduler.toggle(&self.poller, &self.outcome_tx)
    }

    pub fn request_clear(&mut self) {
        self.mode = AppMode::ConfirmClear;
    }

    pub fn confirm_clear(&mut self) {
        if self.mode == AppMode::ConfirmClear {
            self.mode = AppMode::Normal;
            self.poller.spawn_clear(self.outcome_tx.clone());
        }
    }

    pub fn cancel_confirmation(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn cycle_export_format(&mut self) {
        self.export_format = self.export_format.next();
    }

    pub async fn export(&mut self) {
        let result = {
            let store = self.store().read().await;
            export::export_series(&store.series, self.export_format, self.export_dir.as_deref())
        };

        match result {
            Ok(path) => {
                tracing::info!(path = %path.display(), "exported usage history");
                self.show_success(format!("Exported chart data to {}", path.display()));
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.show_error(format!("Export failed: {}", e));
            }
        }
    }

    /// Applies every outcome that has arrived since the last frame.
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.handle_outcome(outcome);
        }
    }

    /// Waits for the next outcome. Used by tests and headless callers.
    pub async fn next_outcome(&mut self) -> Option<PollOutcome> {
        self.outcome_rx.recv().await
    }

    pub fn handle_outcome(&mut self, outcome: PollOutcome) {
        match outcome {
            PollOutcome::MetricsUpdated | PollOutcome::Health(_) => {}
            PollOutcome::MetricsFailed(e) if e.is_transport() => {
                self.show_error("Failed to connect to server".to_string());
            }
            PollOutcome::MetricsFailed(e) => {
                self.show_error(format!("Failed to load metrics: {}", e));
            }
            PollOutcome::Cleared => {
                self.show_success("All metrics data cleared successfully".to_string());
            }
            PollOutcome::ClearFailed(e) if e.is_transport() => {
                self.show_error("Failed to clear data".to_string());
            }
            PollOutcome::ClearFailed(e) => {
                self.show_error(format!("Failed to clear data: {}", e));
            }
        }
    }

    pub fn show_error(&mut self, message: String) {
        self.show_alert(AlertKind::Error, message);
    }

    pub fn show_success(&mut self, message: String) {
        self.show_alert(AlertKind::Success, message);
    }

    fn show_alert(&mut self, kind: AlertKind, message: String) {
        self.alert = Some(Alert {
            kind,
            message,
            raised_at: Instant::now(),
        });
    }

    pub fn expire_alert(&mut self, now: Instant) {
        if let Some(alert) = &self.alert {
            if now.saturating_duration_since(alert.raised_at) >= self.alert_ttl {
                self.alert = None;
            }
        }
    }

    pub fn quit(&mut self) {
        self.scheduler.stop();
        self.should_quit = true;
    }

    pub fn next_tab(&mut self) {
        self.current_tab = self.current_tab.next();
        self.scroll_offset = 0;
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = self.current_tab.previous();
        self.scroll_offset = 0;
    }

    pub fn select_tab(&mut self, index: usize) {
        if let Some(tab) = Tab::from_index(index) {
            self.current_tab = tab;
            self.scroll_offset = 0;
        }
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Help => AppMode::Normal,
            _ => AppMode::Help,
        };
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeMetricsApi;
    use crate::api::types::MetricsSnapshot;
    use crate::error::AppError;
    use crate::metrics::store::ConnectionStatus;

    fn app_with(api: FakeMetricsApi) -> (App, Arc<FakeMetricsApi>) {
        let api = Arc::new(api);
        let store = Arc::new(RwLock::new(DashboardStore::default()));
        let poller = Arc::new(Poller::new(api.clone(), store));
        (App::new(poller, &Config::default()), api)
    }

    fn alert_text(app: &App) -> Option<(AlertKind, &str)> {
        app.alert.as_ref().map(|a| (a.kind, a.message.as_str()))
    }

    #[test]
    fn test_tab_navigation() {
        assert_eq!(Tab::Overview.next(), Tab::Processes);
        assert_eq!(Tab::Overview.previous(), Tab::System);
        assert_eq!(Tab::from_index(2), Some(Tab::System));
        assert_eq!(Tab::from_index(3), None);
    }

    #[tokio::test]
    async fn test_manual_refresh_updates_chart() {
        let (mut app, api) = app_with(FakeMetricsApi::always(MetricsSnapshot::default()));

        app.refresh();
        let outcome = app.next_outcome().await.unwrap();
        app.handle_outcome(outcome);

        assert_eq!(api.metrics_calls(), 1);
        assert!(app.alert.is_none());
        assert_eq!(app.store().read().await.series.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_alerts() {
        let (mut app, _api) = app_with(FakeMetricsApi::new(vec![
            Err(AppError::Api("disk probe failed".to_string())),
            Err(AppError::Transport("connection refused".to_string())),
        ]));

        app.refresh();
        let outcome = app.next_outcome().await.unwrap();
        app.handle_outcome(outcome);
        assert_eq!(
            alert_text(&app),
            Some((AlertKind::Error, "Failed to load metrics: disk probe failed"))
        );
        assert_eq!(app.store().read().await.connection, ConnectionStatus::Error);

        app.refresh();
        let outcome = app.next_outcome().await.unwrap();
        app.handle_outcome(outcome);
        assert_eq!(
            alert_text(&app),
            Some((AlertKind::Error, "Failed to connect to server"))
        );
        assert_eq!(app.store().read().await.connection, ConnectionStatus::Offline);
        assert!(app.store().read().await.series.is_empty());
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let (mut app, api) = app_with(FakeMetricsApi::always(MetricsSnapshot::default()));

        app.confirm_clear();
        assert_eq!(api.clear_calls(), 0);

        app.request_clear();
        assert_eq!(app.mode, AppMode::ConfirmClear);
        app.cancel_confirmation();
        assert_eq!(app.mode, AppMode::Normal);

        app.request_clear();
        app.confirm_clear();
        let outcome = app.next_outcome().await.unwrap();
        app.handle_outcome(outcome);

        assert_eq!(api.clear_calls(), 1);
        assert_eq!(
            alert_text(&app),
            Some((AlertKind::Success, "All metrics data cleared successfully"))
        );
    }

    #[tokio::test]
    async fn test_clear_failure_messages() {
        let (mut app, _api) = app_with(FakeMetricsApi::default().script_clears(vec![
            Err(AppError::Api("Failed to clear metrics".to_string())),
            Err(AppError::Transport("refused".to_string())),
        ]));

        app.request_clear();
        app.confirm_clear();
        let outcome = app.next_outcome().await.unwrap();
        app.handle_outcome(outcome);
        assert_eq!(
            alert_text(&app),
            Some((AlertKind::Error, "Failed to clear data: Failed to clear metrics"))
        );

        app.request_clear();
        app.confirm_clear();
        let outcome = app.next_outcome().await.unwrap();
        app.handle_outcome(outcome);
        assert_eq!(alert_text(&app), Some((AlertKind::Error, "Failed to clear data")));
    }

    #[tokio::test]
    async fn test_alert_expires_after_ttl() {
        let (mut app, _api) = app_with(FakeMetricsApi::default());
        app.show_error("boom".to_string());
        let raised = app.alert.as_ref().unwrap().raised_at;

        app.expire_alert(raised + Duration::from_millis(4_999));
        assert!(app.alert.is_some());

        app.expire_alert(raised + Duration::from_secs(5));
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn test_new_alert_replaces_old() {
        let (mut app, _api) = app_with(FakeMetricsApi::default());
        app.show_error("first".to_string());
        app.show_success("second".to_string());

        assert_eq!(alert_text(&app), Some((AlertKind::Success, "second")));
    }

    #[tokio::test]
    async fn test_toggle_auto_refresh() {
        let (mut app, _api) = app_with(FakeMetricsApi::default());

        assert_eq!(app.auto_refresh_label(), "Off");
        assert_eq!(app.toggle_auto_refresh(), RefreshState::Active);
        assert_eq!(app.auto_refresh_label(), "On (5s)");
        assert_eq!(app.toggle_auto_refresh(), RefreshState::Inactive);
        assert_eq!(app.auto_refresh_label(), "Off");
    }

    #[tokio::test]
    async fn test_export_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(FakeMetricsApi::always(MetricsSnapshot::default()));
        let store = Arc::new(RwLock::new(DashboardStore::default()));
        let poller = Arc::new(Poller::new(api, store));
        let config = Config {
            export_dir: Some(dir.path().to_string_lossy().to_string()),
            ..Config::default()
        };
        let mut app = App::new(poller, &config);

        app.cycle_export_format();
        app.export().await;

        let alert = app.alert.as_ref().unwrap();
        assert_eq!(alert.kind, AlertKind::Success);
        assert!(alert.message.contains(".csv"));
    }
}
