// src/fetch/page.rs

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::Config;

/// Build the one HTTP client used for the run, carrying the browser
/// user agent and the request timeout.
pub fn build_client(config: &Config) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()
        .context("building HTTP client")
}

/// GET `url` and return the body as text.
///
/// Connection errors, non-success statuses and timeouts are all returned as
/// errors; the caller treats any of them as fatal.
#[instrument(level = "info", skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let url = Url::parse(url).with_context(|| format!("parsing source URL {}", url))?;
    info!(%url, "fetching page");

    let body = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))?;

    debug!(bytes = body.len(), "page fetched");
    Ok(body)
}
