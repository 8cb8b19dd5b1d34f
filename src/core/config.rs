use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_THEME: &str = "InspiredGitHub";

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub base_url: Url,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub mermaid_cmd: Option<PathBuf>,
    pub theme: String,
}

impl ViewerConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            user_agent: default_user_agent(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            mermaid_cmd: None,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

fn default_user_agent() -> String {
    format!("finview/{}", env!("CARGO_PKG_VERSION"))
}

fn secs_var(name: &str, default: u64) -> Result<Duration> {
    match std::env::var(name) {
        Ok(v) => v
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| anyhow!("{} must be a whole number of seconds, got {:?}", name, v)),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

impl ViewerConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("FINVIEW_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url)
            .map_err(|e| anyhow!("FINVIEW_BASE_URL is not a valid URL ({}): {}", base_url, e))?;

        let user_agent =
            std::env::var("FINVIEW_USER_AGENT").unwrap_or_else(|_| default_user_agent());

        let timeout = secs_var("FINVIEW_TIMEOUT_SECS", 30)?;
        let connect_timeout = secs_var("FINVIEW_CONNECT_TIMEOUT_SECS", 10)?;

        let mermaid_cmd = std::env::var("FINVIEW_MERMAID_CMD")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let theme = std::env::var("FINVIEW_THEME").unwrap_or_else(|_| DEFAULT_THEME.to_string());

        Ok(Self {
            base_url,
            user_agent,
            timeout,
            connect_timeout,
            mermaid_cmd,
            theme,
        })
    }
}
