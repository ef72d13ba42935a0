use crate::error::{Error, Result};
use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use tracing::{debug, instrument};

const REQUEST_TIMEOUT_SECS: u64 = 15;
const BROWSER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

pub fn client() -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .context("failed to build http client")
}

#[instrument(skip(client))]
pub fn get_text(client: &Client, url: &str) -> Result<String> {
    let fetch = |source| Error::Fetch {
        url: url.to_owned(),
        source,
    };
    let resp = client
        .get(url)
        .header(USER_AGENT, BROWSER_AGENT)
        .send()
        .map_err(fetch)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_owned(),
            status,
        });
    }
    let body = resp.text().map_err(fetch)?;
    debug!(bytes = body.len(), "fetched");
    Ok(body)
}
