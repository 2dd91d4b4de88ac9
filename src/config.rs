use anyhow::Result;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Prediction service
    pub prediction_service_url: String,
    pub prediction_timeout_seconds: Option<u64>,

    // Generative-language guide API
    pub guide_api_url: String,
    pub guide_model: String,
    pub guide_api_key: String,
    pub guide_timeout_seconds: Option<u64>,

    // Assistant
    pub assistant_reply_delay_ms: u64,

    // Page sessions
    pub session_idle_ttl_seconds: u64,
    pub max_sessions: usize,
    pub session_sweep_interval_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Environment::Dev,
            server_addr: "0.0.0.0:8080".to_string(),
            cors_allow_origins: vec!["http://localhost:8080".to_string()],
            prediction_service_url: "http://127.0.0.1:5000".to_string(),
            prediction_timeout_seconds: None,
            guide_api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            guide_model: "gemini-2.5-flash-preview-09-2025".to_string(),
            guide_api_key: String::new(),
            guide_timeout_seconds: None,
            assistant_reply_delay_ms: 1500,
            session_idle_ttl_seconds: 3600,
            max_sessions: 10_000,
            session_sweep_interval_seconds: 60,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or(defaults.server_addr);

        // CORS
        let cors_allow_origins = match env::var("CORS_ALLOW_ORIGINS") {
            Ok(raw) => split_list(&raw),
            Err(_) => defaults.cors_allow_origins,
        };

        // Prediction service
        let prediction_service_url =
            env::var("PREDICTION_SERVICE_URL").unwrap_or(defaults.prediction_service_url);
        let prediction_timeout_seconds = parse_var("PREDICTION_TIMEOUT_SECONDS");

        // Guide API
        let guide_api_url = env::var("GUIDE_API_URL").unwrap_or(defaults.guide_api_url);
        let guide_model = env::var("GUIDE_MODEL").unwrap_or(defaults.guide_model);
        let guide_api_key = env::var("GUIDE_API_KEY").unwrap_or_default();
        let guide_timeout_seconds = parse_var("GUIDE_TIMEOUT_SECONDS");

        let assistant_reply_delay_ms =
            parse_var("ASSISTANT_REPLY_DELAY_MS").unwrap_or(defaults.assistant_reply_delay_ms);
        let session_idle_ttl_seconds =
            parse_var("SESSION_IDLE_TTL_SECONDS").unwrap_or(defaults.session_idle_ttl_seconds);
        let max_sessions = parse_var::<usize>("MAX_SESSIONS")
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_sessions);
        let session_sweep_interval_seconds = parse_var::<u64>("SESSION_SWEEP_INTERVAL_SECONDS")
            .filter(|n| *n > 0)
            .unwrap_or(defaults.session_sweep_interval_seconds);

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            prediction_service_url,
            prediction_timeout_seconds,
            guide_api_url,
            guide_model,
            guide_api_key,
            guide_timeout_seconds,
            assistant_reply_delay_ms,
            session_idle_ttl_seconds,
            max_sessions,
            session_sweep_interval_seconds,
        })
    }

    /// Whether a key for the generative-language API has been supplied.
    pub fn guide_configured(&self) -> bool {
        !self.guide_api_key.trim().is_empty()
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
