use std::time::Duration;

use anyhow::{bail, Result};
use reqwest::{redirect::Policy, Client};

const USER_AGENT: &str = concat!("film_scraper/", env!("CARGO_PKG_VERSION"));

/// One shared client for the whole run: Wikipedia is happy with a
/// descriptive UA, compressed transfer, and a hard timeout instead of
/// per-request fiddling.
pub fn client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .redirect(Policy::limited(8))
        .timeout(Duration::from_secs(20))
        .build()?;
    Ok(client)
}

/// GET a page and return its body as text. Non-success status and
/// non-HTML payloads are errors; the caller decides whether that is
/// fatal (listing) or just a lost row (detail).
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        bail!("http status {}", status.as_u16());
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.to_lowercase().starts_with("text/html") {
        bail!("content-type not html: {content_type}");
    }

    Ok(response.text().await?)
}
