//! Core runtime configuration.
//!
//! # Responsibility
//! - Hold tunables for notification timing, dialog labels and dashboard
//!   copy, with defaults matching the shipped UI.
//! - Load overrides from JSON and reject inconsistent values early.
//!
//! # Invariants
//! - A validated config always has a non-zero exit animation and non-empty
//!   dialog labels.
//! - Unknown keys are rejected rather than silently ignored.

use crate::model::confirmation::ConfirmLabels;
use crate::model::notification::Severity;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

/// Screen corner the notification stack grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopRight => "top_right",
            Self::TopLeft => "top_left",
            Self::BottomRight => "bottom_right",
            Self::BottomLeft => "bottom_left",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationConfig {
    pub success_ttl_ms: u64,
    pub error_ttl_ms: u64,
    pub warning_ttl_ms: u64,
    pub info_ttl_ms: u64,
    /// Duration of the staged exit before an element is detached.
    pub exit_animation_ms: u64,
    pub anchor: Anchor,
    pub confirm_label: String,
    pub cancel_label: String,
    /// Maximum simultaneously active notifications; `0` means unbounded.
    pub max_visible: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success_ttl_ms: 5000,
            error_ttl_ms: 7000,
            warning_ttl_ms: 6000,
            info_ttl_ms: 5000,
            exit_animation_ms: 300,
            anchor: Anchor::TopRight,
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
            max_visible: 0,
        }
    }
}

impl NotificationConfig {
    /// Default display duration for a severity.
    pub fn default_ttl(&self, severity: Severity) -> Duration {
        let millis = match severity {
            Severity::Success => self.success_ttl_ms,
            Severity::Error => self.error_ttl_ms,
            Severity::Warning => self.warning_ttl_ms,
            Severity::Info => self.info_ttl_ms,
        };
        Duration::from_millis(millis)
    }

    pub fn exit_animation(&self) -> Duration {
        Duration::from_millis(self.exit_animation_ms)
    }

    pub fn default_labels(&self) -> ConfirmLabels {
        ConfirmLabels::new(self.confirm_label.clone(), self.cancel_label.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub loading_message: String,
    pub success_message: String,
    /// Generic error used when a failed response carries no usable message.
    pub invoices_error_message: String,
    pub costs_error_message: String,
    /// Shown when the two datasets describe different periods.
    pub mismatch_error_message: String,
    pub unknown_client_label: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            loading_message: "Loading statistics...".to_string(),
            success_message: "Statistics updated.".to_string(),
            invoices_error_message: "Could not retrieve invoice data.".to_string(),
            costs_error_message: "Could not retrieve cost data.".to_string(),
            mismatch_error_message: "Statistics are out of sync. Reload the dashboard."
                .to_string(),
            unknown_client_label: "Unknown client".to_string(),
        }
    }
}

/// Top-level configuration for one page session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub notifications: NotificationConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read config `{path}`: {source}"),
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl CoreConfig {
    /// Parses and validates a JSON config document.
    ///
    /// Missing sections and keys fall back to defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let notifications = &self.notifications;
        if notifications.exit_animation_ms == 0 {
            return Err(ConfigError::Invalid(
                "notifications.exit_animation_ms must be greater than zero".to_string(),
            ));
        }
        if notifications.confirm_label.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "notifications.confirm_label cannot be empty".to_string(),
            ));
        }
        if notifications.cancel_label.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "notifications.cancel_label cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
