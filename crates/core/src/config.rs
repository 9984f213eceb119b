//! Watchdog configuration

use crate::validation::{ValidateConfig, validators};
use crate::Result;
use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do when the stored timestamp cannot be parsed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MalformedPolicy {
    /// Behave as if nothing was stored and overwrite it
    #[default]
    TreatAsAbsent,
    /// Fail closed and end the session
    Logout,
}

/// Idle watchdog settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct WatchdogConfig {
    /// Maximum idle time before forced logout
    pub idle_timeout_ms: u64,
    /// Storage key holding the last-activity timestamp
    pub storage_key: String,
    /// Where to send the user once the session is idle
    pub logout_path: String,
    /// DOM events that count as user activity
    pub activity_events: Vec<String>,
    /// Re-check period while the page stays open, disabled when unset
    pub check_interval_ms: Option<u32>,
    pub on_malformed: MalformedPolicy,
}

impl WatchdogConfig {
    /// 30 minutes
    pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 30 * 60 * 1000;

    pub const DEFAULT_STORAGE_KEY: &'static str = "lastActivity";

    pub const DEFAULT_LOGOUT_PATH: &'static str = "/auth/logout";

    pub const DEFAULT_ACTIVITY_EVENT: &'static str = "click";

    /// Upper bound for the idle timeout, one week
    pub const MAX_IDLE_TIMEOUT_MS: u64 = 7 * 24 * 60 * 60 * 1000;

    /// Longest re-check period `setInterval` accepts without wrapping
    pub const MAX_CHECK_INTERVAL_MS: u32 = 0x7FFF_FFFF;

    /// Parse a JSON document over the defaults and validate the result
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::default().layer_json(json)
    }

    /// Overlay a JSON fragment, keeping current values for missing fields
    pub fn with_patch(&self, patch: &serde_json::Value) -> Result<Self> {
        self.layer_json(&serde_json::to_string(patch)?)
    }

    /// Load `json` on top of `self` and validate the merged result
    fn layer_json(&self, json: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(self)?)
            .add_source(config::File::from_str(json, config::FileFormat::Json))
            .build()?;

        let merged: Self = settings.try_deserialize()?;
        merged.validate()?;
        Ok(merged)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    pub fn check_interval(&self) -> Option<Duration> {
        self.check_interval_ms
            .map(|ms| Duration::from_millis(u64::from(ms)))
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: Self::DEFAULT_IDLE_TIMEOUT_MS,
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            logout_path: Self::DEFAULT_LOGOUT_PATH.to_string(),
            activity_events: vec![Self::DEFAULT_ACTIVITY_EVENT.to_string()],
            check_interval_ms: None,
            on_malformed: MalformedPolicy::default(),
        }
    }
}

impl ValidateConfig for WatchdogConfig {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        validators::validate_range(
            self.idle_timeout_ms,
            1,
            Self::MAX_IDLE_TIMEOUT_MS,
            "idle_timeout_ms",
        )?;
        validators::validate_not_empty(&self.storage_key, "storage_key")?;
        validators::validate_logout_target(&self.logout_path, "logout_path")?;

        if self.activity_events.is_empty() {
            return Err(ConfigError::Message(
                "activity_events: at least one event is required".to_string(),
            ));
        }
        for event in &self.activity_events {
            validators::validate_not_empty(event, "activity_events")?;
        }

        if let Some(interval) = self.check_interval_ms {
            validators::validate_range(
                interval,
                1,
                Self::MAX_CHECK_INTERVAL_MS,
                "check_interval_ms",
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    #[test]
    fn test_defaults_match_legacy_script() {
        let config = WatchdogConfig::default();
        assert_eq!(config.idle_timeout(), Duration::from_secs(30 * 60));
        assert_eq!(config.storage_key, "lastActivity");
        assert_eq!(config.logout_path, "/auth/logout");
        assert_eq!(config.activity_events, vec!["click".to_string()]);
        assert_eq!(config.check_interval(), None);
        assert_eq!(config.on_malformed, MalformedPolicy::TreatAsAbsent);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_keeps_defaults_for_missing_fields() {
        let config = WatchdogConfig::from_json_str(
            r#"{"idleTimeoutMs": 600000, "onMalformed": "logout", "checkIntervalMs": 30000}"#,
        )
        .unwrap();

        assert_eq!(config.idle_timeout_ms, 600_000);
        assert_eq!(config.on_malformed, MalformedPolicy::Logout);
        assert_eq!(config.check_interval(), Some(Duration::from_secs(30)));
        assert_eq!(config.storage_key, WatchdogConfig::DEFAULT_STORAGE_KEY);
        assert_eq!(config.logout_path, WatchdogConfig::DEFAULT_LOGOUT_PATH);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        let err = WatchdogConfig::from_json_str(r#"{"idleTimeoutMs": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("idle_timeout_ms"));

        let err = WatchdogConfig::from_json_str(r#"{"activityEvents": []}"#).unwrap_err();
        assert!(err.to_string().contains("activity_events"));

        let err = WatchdogConfig::from_json_str(r#"{"logoutPath": "logout"}"#).unwrap_err();
        assert!(err.to_string().contains("logout_path"));

        let err = WatchdogConfig::from_json_str(r#"{"checkIntervalMs": 0}"#).unwrap_err();
        assert!(err.to_string().contains("check_interval_ms"));
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let err = WatchdogConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let err = WatchdogConfig::from_json_str(r#"{"idleTimeout": 1000}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("idleTimeout"));
    }

    #[test]
    fn test_check_interval_must_fit_set_interval() {
        let config = WatchdogConfig::from_json_str(r#"{"checkIntervalMs": 2147483647}"#).unwrap();
        assert_eq!(config.check_interval_ms, Some(WatchdogConfig::MAX_CHECK_INTERVAL_MS));

        let err = WatchdogConfig::from_json_str(r#"{"checkIntervalMs": 2147483648}"#).unwrap_err();
        assert!(err.to_string().contains("check_interval_ms"));

        let config = WatchdogConfig {
            check_interval_ms: Some(3_000_000_000),
            ..WatchdogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_patch_layers_over_current_values() {
        let base = WatchdogConfig {
            storage_key: "idle".to_string(),
            check_interval_ms: Some(1_000),
            ..WatchdogConfig::default()
        };

        let config = base.with_patch(&json!({"logoutPath": "/bye"})).unwrap();
        assert_eq!(config.storage_key, "idle");
        assert_eq!(config.check_interval_ms, Some(1_000));
        assert_eq!(config.logout_path, "/bye");

        assert!(base.with_patch(&json!({"storageKey": ""})).is_err());
    }

    #[test]
    fn test_with_patch_replaces_event_list() {
        let config = WatchdogConfig::default()
            .with_patch(&json!({"activityEvents": ["keydown", "pointerdown"]}))
            .unwrap();
        assert_eq!(config.activity_events, vec!["keydown", "pointerdown"]);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: WatchdogConfig = serde_json::from_value(json!({"storageKey": "idle"})).unwrap();
        assert_eq!(config.storage_key, "idle");
        assert_eq!(config.idle_timeout_ms, WatchdogConfig::DEFAULT_IDLE_TIMEOUT_MS);
    }
}
