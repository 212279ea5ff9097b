use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::api::Backend;
use crate::config::Config;
use crate::models::{AlphaStrategy, AnalysisResults, ExecutionStatus, Platform, Position};
use crate::polling::{Generation, RepeatingTask};
use crate::views::Failure;

pub const POSITIONS_ERROR: &str = "Failed to fetch positions";
pub const ANALYSIS_ERROR: &str = "Analysis failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Execution,
    Analysis,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Execution => write!(f, "execution"),
            Tab::Analysis => write!(f, "analysis"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UnifiedState {
    pub tab: Tab,
    pub status: Option<ExecutionStatus>,
    pub positions: Vec<Position>,
    pub analysis: Option<AnalysisResults>,
    pub analyzing: bool,
    pub loading: bool,
    pub error: Option<String>,
    analysis_slot: Generation,
}

impl UnifiedState {
    pub fn total_profit(&self) -> f64 {
        self.positions.iter().map(|p| p.profit).sum()
    }
}

async fn refresh_status(backend: &dyn Backend, state: &RwLock<UnifiedState>) {
    match backend.execution_status().await {
        Ok(status) => state.write().await.status = Some(status),
        Err(e) => error!("Failed to fetch execution status: {}", e),
    }
}

async fn refresh_positions(backend: &dyn Backend, state: &RwLock<UnifiedState>, on_fail: Failure) {
    if on_fail == Failure::Banner {
        state.write().await.loading = true;
    }
    let res = backend.positions().await;
    let mut s = state.write().await;
    if on_fail == Failure::Banner {
        s.loading = false;
    }
    match res {
        Ok(positions) => s.positions = positions,
        Err(e) => {
            error!("Failed to fetch positions: {}", e);
            if on_fail == Failure::Banner {
                s.error = Some(POSITIONS_ERROR.to_string());
            }
        }
    }
}

/// Broker control and factor analysis behind two local tabs.
pub struct UnifiedTerminal {
    backend: Arc<dyn Backend>,
    state: Arc<RwLock<UnifiedState>>,
    poll_interval: Duration,
    poller: Option<RepeatingTask>,
}

impl UnifiedTerminal {
    pub fn new(backend: Arc<dyn Backend>, cfg: &Config) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(UnifiedState::default())),
            poll_interval: cfg.poll_interval(),
            poller: None,
        }
    }

    pub async fn snapshot(&self) -> UnifiedState {
        self.state.read().await.clone()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| p.is_running())
    }

    /// Initial fetch plus a background refresh of status and positions that
    /// only runs while the execution tab is showing.
    pub async fn mount(&mut self) {
        self.load_tab().await;

        let backend = self.backend.clone();
        let state = self.state.clone();
        self.poller = Some(RepeatingTask::spawn(
            "execution",
            self.poll_interval,
            move || {
                let backend = backend.clone();
                let state = state.clone();
                async move {
                    if state.read().await.tab != Tab::Execution {
                        return;
                    }
                    refresh_status(backend.as_ref(), &state).await;
                    refresh_positions(backend.as_ref(), &state, Failure::Silent).await;
                }
            },
        ));
    }

    pub fn unmount(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.cancel();
        }
    }

    pub async fn set_tab(&self, tab: Tab) {
        self.state.write().await.tab = tab;
        self.load_tab().await;
    }

    async fn load_tab(&self) {
        refresh_status(self.backend.as_ref(), &self.state).await;
        if self.state.read().await.tab == Tab::Execution {
            refresh_positions(self.backend.as_ref(), &self.state, Failure::Banner).await;
        }
    }

    /// Ask the backend to route orders through `platform`, then re-read
    /// status and positions whether or not the switch was accepted. Nothing
    /// changes locally until the re-read.
    pub async fn switch_platform(&self, platform: Platform) {
        info!("Switching execution platform to {}", platform);
        if let Err(e) = self.backend.switch_platform(platform).await {
            error!("Failed to switch platform to {}: {}", platform, e);
        }
        refresh_status(self.backend.as_ref(), &self.state).await;
        refresh_positions(self.backend.as_ref(), &self.state, Failure::Banner).await;
    }

    /// Run factor analysis. When triggers overlap, only the most recently
    /// issued one may write results.
    pub async fn trigger_analysis(&self, strategy: AlphaStrategy) {
        let ticket = {
            let mut s = self.state.write().await;
            s.analyzing = true;
            s.analysis = None;
            s.analysis_slot.next()
        };

        let res = self.backend.alpha_analysis(strategy).await;

        let mut s = self.state.write().await;
        if !s.analysis_slot.is_current(ticket) {
            debug!("Discarding superseded {} analysis", strategy);
            return;
        }
        s.analyzing = false;
        match res {
            Ok(results) => {
                info!("{} analysis complete", strategy);
                s.analysis = Some(results);
            }
            Err(e) => {
                error!("{} analysis failed: {}", strategy, e);
                s.error = Some(ANALYSIS_ERROR.to_string());
            }
        }
    }
}
