//! Application settings management

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the stored daemon URL
pub const DAEMON_URL_ENV: &str = "VIRTUAL_MANAGER_DAEMON_URL";

/// Application theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Dark, Theme::Light]
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base address of the container daemon
    pub daemon_url: String,
    /// Upper bound for a single daemon request
    pub request_timeout_secs: u64,
    /// Application theme
    pub theme: Theme,
    /// How long toast notifications stay on screen
    pub notification_secs: u64,
    /// Ask before deleting an image
    pub confirm_image_delete: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daemon_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 5,
            theme: Theme::Dark,
            notification_secs: 4,
            confirm_image_delete: true,
        }
    }
}

impl Settings {
    /// Get the data directory
    pub fn data_directory() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("VirtualManager")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    /// Validate settings and fix any invalid values
    pub fn validate(&mut self) {
        self.daemon_url = self.daemon_url.trim().trim_end_matches('/').to_string();
        if self.daemon_url.is_empty() {
            self.daemon_url = Self::default().daemon_url;
        }
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 120);
        self.notification_secs = self.notification_secs.clamp(1, 30);
    }

    /// Normalize a daemon URL override the way `validate` treats the stored URL.
    /// A blank override counts as unset.
    pub fn daemon_override(url: Option<String>) -> Option<String> {
        url.map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
    }

    /// `VIRTUAL_MANAGER_DAEMON_URL`, if set. Only used when building the
    /// startup client, never written back into the stored settings.
    pub fn env_daemon_override() -> Option<String> {
        Self::daemon_override(std::env::var(DAEMON_URL_ENV).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_daemon() {
        let settings = Settings::default();
        assert_eq!(settings.daemon_url, "http://localhost:5000");
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn validate_clamps_and_trims() {
        let mut settings = Settings {
            daemon_url: " http://10.0.0.2:5000/ ".into(),
            request_timeout_secs: 0,
            notification_secs: 1000,
            ..Default::default()
        };
        settings.validate();
        assert_eq!(settings.daemon_url, "http://10.0.0.2:5000");
        assert_eq!(settings.request_timeout_secs, 1);
        assert_eq!(settings.notification_secs, 30);
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let mut settings = Settings {
            daemon_url: "   ".into(),
            ..Default::default()
        };
        settings.validate();
        assert_eq!(settings.daemon_url, "http://localhost:5000");
    }

    #[test]
    fn override_is_normalized_and_blank_is_unset() {
        assert_eq!(
            Settings::daemon_override(Some(" http://daemon:7000/ ".into())).as_deref(),
            Some("http://daemon:7000")
        );
        assert_eq!(Settings::daemon_override(Some("  ".into())), None);
        assert_eq!(Settings::daemon_override(None), None);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"Light"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.daemon_url, "http://localhost:5000");
        assert!(settings.confirm_image_delete);
    }
}
