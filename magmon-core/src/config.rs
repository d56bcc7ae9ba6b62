//! Build-time client configuration.
//!
//! Values are baked in with `option_env!` so a deployment picks its backend at
//! compile time (e.g. `MAGMON_API_BASE_URL=https://league.example/api trunk build`).

/// Backend used when `MAGMON_API_BASE_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5004/api";
/// Request timeout applied by the browser transport.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Configuration compiled into this build.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("MAGMON_API_BASE_URL"),
            option_env!("MAGMON_REQUEST_TIMEOUT_MS"),
        )
    }

    #[must_use]
    pub fn from_values(base_url: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let defaults = Self::default();
        let api_base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map_or(defaults.api_base_url, |url| {
                url.trim_end_matches('/').to_string()
            });
        let timeout_ms = timeout_ms
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(defaults.timeout_ms);
        Self {
            api_base_url,
            timeout_ms,
        }
    }

    /// Join an endpoint path onto the API base.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Origin serving uploaded files: the API base without its `/api` suffix.
    #[must_use]
    pub fn asset_origin(&self) -> &str {
        let base = self.api_base_url.trim_end_matches('/');
        base.strip_suffix("/api").unwrap_or(base)
    }

    /// Absolute URL for a server-relative asset such as an avatar path.
    ///
    /// Already-absolute URLs are returned untouched.
    #[must_use]
    pub fn asset_url(&self, relative: &str) -> String {
        if relative.starts_with("http://") || relative.starts_with("https://") {
            return relative.to_string();
        }
        format!(
            "{}/{}",
            self.asset_origin(),
            relative.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_missing() {
        let cfg = ClientConfig::from_values(None, None);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.timeout_ms, 10_000);
    }

    #[test]
    fn overrides_trim_trailing_slash_and_ignore_bad_timeout() {
        let cfg = ClientConfig::from_values(Some("https://league.example/api/"), Some("abc"));
        assert_eq!(cfg.api_base_url, "https://league.example/api");
        assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);

        let cfg = ClientConfig::from_values(Some("  "), Some("2500"));
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.timeout_ms, 2500);
    }

    #[test]
    fn endpoint_and_asset_urls() {
        let cfg = ClientConfig::default();
        assert_eq!(
            cfg.endpoint_url("/decks/4/versions"),
            "http://127.0.0.1:5004/api/decks/4/versions"
        );
        assert_eq!(cfg.asset_origin(), "http://127.0.0.1:5004");
        assert_eq!(
            cfg.asset_url("/static/uploads/avatars/a.png"),
            "http://127.0.0.1:5004/static/uploads/avatars/a.png"
        );
        assert_eq!(cfg.asset_url("https://cdn/x.png"), "https://cdn/x.png");
    }
}
