use crate::db::DEFAULT_LIST_LIMIT;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const API_PREFIX: &str = "/api/v1";
const ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000,http://localhost:3001";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    /// In-memory storage is used when unset
    pub mongodb_uri: Option<String>,
    pub allowed_origins: Vec<String>,
    pub list_limit: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            api_prefix: API_PREFIX.to_string(),
            mongodb_uri: None,
            allowed_origins: split_origins(ALLOWED_ORIGINS),
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    /// Create config from environment variables or use defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            api_prefix: std::env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            mongodb_uri: std::env::var("MONGODB_URI")
                .ok()
                .filter(|uri| !uri.trim().is_empty()),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|value| split_origins(&value))
                .unwrap_or(defaults.allowed_origins),
            list_limit: std::env::var("TRIP_LIST_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|limit: &i64| *limit > 0)
                .unwrap_or(defaults.list_limit),
        }
    }
}
