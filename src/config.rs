use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.chess.com/pub/player";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,                  // player endpoint root, no trailing slash needed
    pub user_agent: String,                // the API rejects anonymous clients
    pub request_timeout_secs: Option<u64>, // None = no timeout
    pub chart_months: usize,               // months shown in the activity chart
    pub rayon_threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("chess-archive-stats/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: Some(30),
            chart_months: 12,
            rayon_threads: None,
        }
    }
}

impl Config {
    /// `config.toml` in the working directory, then environment overrides.
    pub fn load() -> Self {
        let mut cfg = match std::fs::read_to_string("config.toml") {
            Ok(s) => Self::from_toml_str(&s),
            Err(_) => Self::default(),
        };
        cfg.apply_env(|name| std::env::var(name).ok());
        cfg
    }

    pub fn from_toml_str(s: &str) -> Self {
        toml::from_str(s).unwrap_or_else(|e| {
            vprintln!("config: ignoring invalid config.toml ({})", e);
            Self::default()
        })
    }

    fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(url) = get("CHESS_STATS_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(ua) = get("CHESS_STATS_USER_AGENT").filter(|v| !v.is_empty()) {
            self.user_agent = ua;
        }
    }
}
