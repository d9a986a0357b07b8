//! # Health Check View Model
//!
//! Three-state view over a [`HealthSource`]: `Loading` until the fetch
//! settles, then `Error` or `Success`. Leaving a settled state only happens
//! on an explicit refresh or retry; nothing polls.
//!
//! ```text
//!   Loading ──settle(Ok)──▶ Success ──refresh()──▶ Loading
//!      │
//!      └────settle(Err)──▶ Error ──retry()──▶ Loading
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::api_client::HealthSource;
use super::error::ClientResult;
use crate::models::{HealthStatus, Verdict};

pub const LOADING_MESSAGE: &str = "Checking API health...";
pub const ERROR_TITLE: &str = "Failed to connect to API";
pub const DEFAULT_ERROR_MESSAGE: &str =
    "Unable to reach the GraphQL endpoint. Make sure the API server is running.";
pub const PANEL_TITLE: &str = "API Health Check";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error { message: String },
    Success(HealthStatus),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error { .. } => "error",
            Self::Success(_) => "success",
        }
    }
}

/// Visual tone of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

impl Tone {
    fn for_flag(ok: bool) -> Self {
        if ok {
            Self::Success
        } else {
            Self::Error
        }
    }
}

/// User-triggerable action offered by a rendered view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Retry,
    Refresh,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Retry => "Retry",
            Self::Refresh => "Refresh Status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLine {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

/// Presentation-ready output of [`HealthCheckView::render`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedView {
    Loading {
        message: String,
    },
    Error {
        title: String,
        message: String,
        action: Action,
    },
    Success {
        status: Badge,
        uptime: Option<String>,
        services: Option<Vec<ServiceLine>>,
        action: Action,
    },
}

impl RenderedView {
    pub fn action(&self) -> Option<Action> {
        match self {
            Self::Loading { .. } => None,
            Self::Error { action, .. } | Self::Success { action, .. } => Some(*action),
        }
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading { message } => writeln!(f, "{message}"),
            Self::Error {
                title,
                message,
                action,
            } => {
                writeln!(f, "{title}")?;
                writeln!(f, "{message}")?;
                writeln!(f, "[{}]", action.label())
            }
            Self::Success {
                status,
                uptime,
                services,
                action,
            } => {
                writeln!(f, "{PANEL_TITLE}")?;
                writeln!(f, "Status: {}", status.text)?;
                if let Some(uptime) = uptime {
                    writeln!(f, "Uptime: {uptime}")?;
                }
                if let Some(services) = services {
                    writeln!(f, "Services:")?;
                    for line in services {
                        writeln!(f, "  {}: {}", line.label, line.value)?;
                    }
                }
                writeln!(f, "[{}]", action.label())
            }
        }
    }
}

/// `125` → `"2m 5s"`
pub fn format_uptime(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Service name with its first letter capitalized
pub fn display_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct HealthCheckView {
    source: Arc<dyn HealthSource>,
    state: ViewState,
}

impl fmt::Debug for HealthCheckView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthCheckView")
            .field("state", &self.state.name())
            .finish()
    }
}

impl HealthCheckView {
    /// New view in the `Loading` state; call [`load`](Self::load) to fetch
    pub fn new(source: Arc<dyn HealthSource>) -> Self {
        Self {
            source,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Resolve a pending fetch. Ignored unless currently `Loading`.
    pub fn settle(&mut self, result: ClientResult<HealthStatus>) -> bool {
        if !self.state.is_loading() {
            debug!(state = self.state.name(), "Ignoring settle outside loading state");
            return false;
        }

        self.state = match result {
            Ok(health) => ViewState::Success(health),
            Err(e) => {
                warn!(error = %e, "Health fetch failed");
                ViewState::Error {
                    message: e.to_string(),
                }
            }
        };
        true
    }

    /// Move a settled view back to `Loading`. No-op while already loading.
    pub fn refresh(&mut self) -> bool {
        if self.state.is_loading() {
            return false;
        }
        self.state = ViewState::Loading;
        true
    }

    /// Fetch from the source and settle
    pub async fn load(&mut self) -> &ViewState {
        self.state = ViewState::Loading;
        let result = self.source.fetch_health().await;
        self.settle(result);
        &self.state
    }

    /// Re-enter `Loading` from a settled state and fetch again
    pub async fn retry(&mut self) -> &ViewState {
        self.refresh();
        self.load().await
    }

    pub fn render(&self) -> RenderedView {
        match &self.state {
            ViewState::Loading => RenderedView::Loading {
                message: LOADING_MESSAGE.to_string(),
            },
            ViewState::Error { message } => RenderedView::Error {
                title: ERROR_TITLE.to_string(),
                message: if message.trim().is_empty() {
                    DEFAULT_ERROR_MESSAGE.to_string()
                } else {
                    message.clone()
                },
                action: Action::Retry,
            },
            ViewState::Success(health) => RenderedView::Success {
                status: Badge {
                    text: health.status.as_str().to_uppercase(),
                    tone: Tone::for_flag(health.is_ok()),
                },
                uptime: health.uptime.map(format_uptime),
                services: health.services.as_ref().map(|services| {
                    services
                        .iter()
                        .map(|(name, verdict)| ServiceLine {
                            label: display_label(name),
                            value: verdict.as_str().to_string(),
                            tone: Tone::for_flag(*verdict == Verdict::Healthy),
                        })
                        .collect()
                }),
                action: Action::Refresh,
            },
        }
    }
}
