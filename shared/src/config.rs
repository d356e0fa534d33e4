pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 30_000;
pub const DEFAULT_HISTORY_LIMIT: u32 = 5;

/// Client settings. The web build fills these from build-time environment
/// variables; anything unset or unparsable keeps its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Prefix for API paths. Empty means same origin.
    pub api_base_url: String,
    pub request_timeout_ms: u32,
    pub history_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

fn positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse::<u32>().ok()).filter(|v| *v > 0)
}

impl AppConfig {
    pub fn from_overrides(
        api_base_url: Option<&str>,
        request_timeout_ms: Option<&str>,
        history_limit: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: api_base_url
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            request_timeout_ms: positive(request_timeout_ms).unwrap_or(defaults.request_timeout_ms),
            history_limit: positive(history_limit).unwrap_or(defaults.history_limit),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(AppConfig::from_overrides(None, None, None), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_overrides(Some("http://localhost:8000/"), Some("5000"), Some("10"));
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.url("/api/auth/login"), "http://localhost:8000/api/auth/login");
    }

    #[test]
    fn test_bad_numbers_keep_defaults() {
        let config = AppConfig::from_overrides(None, Some("soon"), Some("0"));
        assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.url("/api/yield/predict"), "/api/yield/predict");
    }
}
