//! Environment-backed gateway configuration, read once at startup.

use std::time::Duration;

/// Runtime configuration from `SLIPSTREAM_*` environment variables.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Static bearer key protecting `/v1` and the admin surface.
    pub api_key: String,
    pub upstream_base_url: String,
    /// Outbound proxy: http(s) or socks5, optional inline `user:pass`.
    pub proxy_url: Option<String>,
    /// Attempt budget per inbound request.
    pub max_attempts: usize,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Ask the upstream to treat conversations as temporary.
    pub temporary_conversations: bool,
    /// Raw credential seed values consumed once at startup.
    pub sso_seeds: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5200,
            api_key: String::new(),
            upstream_base_url: "https://grok.com".to_string(),
            proxy_url: None,
            max_attempts: 2,
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(300),
            temporary_conversations: false,
            sso_seeds: Vec::new(),
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_or_keep<T: std::str::FromStr>(key: &str, current: T) -> T {
    match env_var(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("ignoring unparsable {key}={raw}");
            current
        }),
        None => current,
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(v) = env_var("SLIPSTREAM_HOST") {
            cfg.host = v;
        }
        cfg.port = parse_or_keep("SLIPSTREAM_PORT", cfg.port);
        if let Some(v) = env_var("SLIPSTREAM_API_KEY") {
            cfg.api_key = v;
        }
        if let Some(v) = env_var("SLIPSTREAM_UPSTREAM_URL") {
            cfg.upstream_base_url = v.trim_end_matches('/').to_string();
        }
        cfg.proxy_url = env_var("SLIPSTREAM_PROXY");
        cfg.max_attempts = parse_or_keep("SLIPSTREAM_MAX_ATTEMPTS", cfg.max_attempts).max(1);
        cfg.connect_timeout = Duration::from_secs(parse_or_keep(
            "SLIPSTREAM_CONNECT_TIMEOUT_SECS",
            cfg.connect_timeout.as_secs(),
        ));
        cfg.read_timeout = Duration::from_secs(parse_or_keep(
            "SLIPSTREAM_READ_TIMEOUT_SECS",
            cfg.read_timeout.as_secs(),
        ));
        cfg.temporary_conversations =
            parse_or_keep("SLIPSTREAM_TEMPORARY_CHATS", cfg.temporary_conversations);
        if let Some(v) = env_var("SLIPSTREAM_SSO") {
            cfg.sso_seeds = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        cfg
    }
}
