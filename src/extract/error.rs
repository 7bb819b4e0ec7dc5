use thiserror::Error;

pub const BIN_NAME: &str = "scrape_single_site";

/// Failure categories of a single extraction. `Display` is the exact
/// user-facing message carried in the error record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("URL não fornecida. Uso: {program} <URL>")]
    MissingInput { program: String },
    #[error("Timeout: Website não respondeu em 30 segundos")]
    Timeout,
    #[error("HTTP Error: {0}")]
    HttpStatus(u16),
    #[error("Erro de rede: {0}")]
    Network(String),
    #[error("Erro inesperado: {0}")]
    Unexpected(String),
}

impl ExtractError {
    pub fn missing_input() -> Self {
        ExtractError::MissingInput { program: BIN_NAME.to_string() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::MissingInput { .. } => "missing_input",
            ExtractError::Timeout => "timeout",
            ExtractError::HttpStatus(_) => "http_status",
            ExtractError::Network(_) => "network",
            ExtractError::Unexpected(_) => "unexpected",
        }
    }
}

// reqwest flags are not exclusive; timeout wins over connect.
impl From<reqwest::Error> for ExtractError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ExtractError::Timeout;
        }
        if let Some(status) = e.status() {
            return ExtractError::HttpStatus(status.as_u16());
        }
        if e.is_connect() || e.is_request() || e.is_redirect() || e.is_body() {
            return ExtractError::Network(e.to_string());
        }
        ExtractError::Unexpected(e.to_string())
    }
}
