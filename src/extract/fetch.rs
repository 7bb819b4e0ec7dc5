use reqwest::Client;
use url::Url;

use super::config::ExtractOptions;
use super::error::ExtractError;

pub struct Fetched {
    pub status: u16,
    pub body: String,
}

// A bad header value (e.g. a control char in USER_AGENT) fails here, not at startup.
pub fn build_client(opts: &ExtractOptions) -> Result<Client, ExtractError> {
    let client = Client::builder()
        .user_agent(opts.user_agent.clone())
        .timeout(opts.timeout)
        .build()?;
    Ok(client)
}

/// One GET, no retry. Non-2xx responses become `HttpStatus`.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<Fetched, ExtractError> {
    let resp = client.get(url.clone()).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ExtractError::HttpStatus(status.as_u16()));
    }
    let body = resp.text().await?;
    Ok(Fetched { status: status.as_u16(), body })
}
