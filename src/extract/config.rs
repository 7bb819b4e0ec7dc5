use std::env;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions { user_agent: DEFAULT_USER_AGENT.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

impl ExtractOptions {
    /// Reads `USER_AGENT`; call after `.env` has been loaded.
    pub fn from_env() -> Self {
        Self::from_user_agent(env::var("USER_AGENT").ok())
    }

    pub fn from_user_agent(ua: Option<String>) -> Self {
        let user_agent = match ua {
            Some(v) if !v.trim().is_empty() => v,
            _ => DEFAULT_USER_AGENT.to_string(),
        };
        ExtractOptions { user_agent, ..Default::default() }
    }
}

#[cfg(test)]
impl ExtractOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
