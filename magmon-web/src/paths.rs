//! URL helpers that respect the deployment base path and the API origin.
//!
//! `PUBLIC_URL` (e.g. `/league` when served from a subdirectory) prefixes
//! router paths and bundled assets. Avatar URLs come back from the backend as
//! paths relative to the API origin.

use magmon_core::ClientConfig;

/// Bundled image shown for players without an uploaded avatar.
pub const DEFAULT_AVATAR: &str = "static/img/avatar-default.svg";

#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Base path for the router, `None` when the app is served from the root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Resolve a backend avatar path, falling back to the bundled placeholder.
#[must_use]
pub fn avatar_src(config: &ClientConfig, avatar_url: Option<&str>) -> String {
    avatar_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map_or_else(|| asset_path(DEFAULT_AVATAR), |url| config.asset_url(url))
}

/// Normalized deployment prefix: no trailing slash, empty at the root.
fn normalize_base(base: &str) -> &str {
    base.trim().trim_end_matches('/')
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    format!(
        "{}/{}",
        normalize_base(base),
        relative.trim_start_matches('/')
    )
}

fn router_base_with_base(base: &str) -> Option<String> {
    Some(normalize_base(base))
        .filter(|base| !base.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_root_prefixed_path_when_base_missing() {
        assert_eq!(asset_path("static/img/logo.svg"), "/static/img/logo.svg");
        assert_eq!(asset_path("/static/img/logo.svg"), "/static/img/logo.svg");
    }

    #[test]
    fn builds_paths_with_public_base() {
        assert_eq!(
            asset_path_with_base("/static/img/logo.svg", "/league/"),
            "/league/static/img/logo.svg"
        );
    }

    #[test]
    fn router_base_is_trimmed() {
        assert_eq!(router_base(), None);
        assert_eq!(router_base_with_base("/league/"), Some("/league".to_string()));
    }

    #[test]
    fn avatars_resolve_against_api_origin() {
        let config = ClientConfig::default();
        assert_eq!(
            avatar_src(&config, Some("/static/uploads/avatars/7.png")),
            "http://127.0.0.1:5004/static/uploads/avatars/7.png"
        );
        assert_eq!(
            avatar_src(&config, Some("https://cdn.example/a.png")),
            "https://cdn.example/a.png"
        );
        assert_eq!(avatar_src(&config, None), "/static/img/avatar-default.svg");
        assert_eq!(avatar_src(&config, Some("  ")), "/static/img/avatar-default.svg");
    }
}
