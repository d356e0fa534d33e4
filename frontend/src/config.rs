use shared::config::AppConfig;

/// Settings baked in at build time, e.g.
/// `API_BASE_URL=http://localhost:8000 trunk build`.
pub fn app_config() -> AppConfig {
    AppConfig::from_overrides(
        option_env!("API_BASE_URL"),
        option_env!("REQUEST_TIMEOUT_MS"),
        option_env!("HISTORY_LIMIT"),
    )
}
