use serde::{Deserialize, Serialize};

use crate::size::SizeType;

const DEFAULT_AUTH_BASE: &str = "http://api-rembg.kineticproxies.com";

/// Endpoints and storage keys used by the page.
///
/// Every field has a default; a partial JSON object only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base of the background-removal API. Empty means same origin.
    pub api_base: String,
    /// Base of the auth backend used for login and registration.
    pub auth_base: String,
    pub token_key: String,
    pub theme_key: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            auth_base: option_env!("REMBG_AUTH_URL")
                .unwrap_or(DEFAULT_AUTH_BASE)
                .to_string(),
            token_key: "authToken".to_string(),
            theme_key: "theme".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Merges a stored JSON override over the defaults. Invalid JSON is ignored.
    pub fn from_override(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str(raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("ignoring invalid config override: {e}");
                Self::default()
            }
        }
    }

    pub fn remove_bg_url(&self, size: SizeType) -> String {
        format!("{}/api/remove-bg?size={size}", trim_base(&self.api_base))
    }

    pub fn batch_process_url(&self, size: SizeType) -> String {
        format!("{}/api/batch-process?size={size}", trim_base(&self.api_base))
    }

    pub fn validate_token_url(&self) -> String {
        format!("{}/api/validate-token", trim_base(&self.api_base))
    }

    pub fn login_url(&self) -> String {
        format!(
            "{}/api/collections/users/auth-with-password",
            trim_base(&self.auth_base)
        )
    }

    pub fn register_url(&self) -> String {
        format!("{}/api/collections/users/records", trim_base(&self.auth_base))
    }
}

fn trim_base(base: &str) -> &str {
    base.trim().trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_same_origin_api() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.remove_bg_url(SizeType::Full), "/api/remove-bg?size=full");
        assert_eq!(
            cfg.batch_process_url(SizeType::Reduced),
            "/api/batch-process?size=reduced"
        );
        assert_eq!(cfg.validate_token_url(), "/api/validate-token");
        assert_eq!(cfg.token_key, "authToken");
        assert_eq!(cfg.theme_key, "theme");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = AppConfig::from_override(Some(
            r#"{"auth_base": "https://auth.example.com/", "log_level": "debug"}"#,
        ));
        assert_eq!(
            cfg.login_url(),
            "https://auth.example.com/api/collections/users/auth-with-password"
        );
        assert_eq!(
            cfg.register_url(),
            "https://auth.example.com/api/collections/users/records"
        );
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.token_key, "authToken");
    }

    #[test]
    fn invalid_override_falls_back_to_defaults() {
        assert_eq!(AppConfig::from_override(Some("{not json")), AppConfig::default());
        assert_eq!(AppConfig::from_override(Some("   ")), AppConfig::default());
        assert_eq!(AppConfig::from_override(None), AppConfig::default());
    }

    #[test]
    fn api_base_is_joined_without_double_slash() {
        let cfg = AppConfig {
            api_base: "https://rembg.example.com/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            cfg.remove_bg_url(SizeType::Reduced),
            "https://rembg.example.com/api/remove-bg?size=reduced"
        );
    }
}
