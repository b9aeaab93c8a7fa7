// src/fetch/sheet.rs
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
use url::Url;

const EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d/";
const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// A published spreadsheet tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSource {
    pub sheet_id: String,
    pub sheet_name: String,
}

/// CSV export URL for one tab:
/// `…/d/{id}/gviz/tq?tqx=out:csv&sheet={name}` with the name query-encoded.
pub fn sheet_csv_url(source: &SheetSource) -> Result<Url> {
    let mut url = Url::parse(EXPORT_BASE)?
        .join(&format!("{}/gviz/tq", source.sheet_id))
        .with_context(|| format!("building export URL for sheet {}", source.sheet_id))?;
    url.query_pairs_mut()
        .append_pair("tqx", "out:csv")
        .append_pair("sheet", &source.sheet_name);
    Ok(url)
}

/// Download the tab as CSV text, retrying transient failures.
pub async fn fetch_sheet_csv(client: &Client, source: &SheetSource) -> Result<String> {
    let url = sheet_csv_url(source)?;
    let mut attempt = 0;

    loop {
        attempt += 1;

        match client.get(url.as_str()).send().await {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(body) => {
                    info!(sheet = %source.sheet_name, bytes = body.len(), "downloaded sheet");
                    return Ok(body);
                }
                Err(e) if attempt < MAX_RETRIES => {
                    warn!(attempt, error = %e, "reading sheet body failed; retrying");
                    sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e).context("reading sheet body"),
            },
            Ok(resp) if resp.status().is_server_error() && attempt < MAX_RETRIES => {
                warn!(attempt, status = %resp.status(), "sheet export unavailable; retrying");
                sleep(RETRY_DELAY).await;
            }
            Ok(resp) => return Err(anyhow!("HTTP error {} fetching {}", resp.status(), url)),
            Err(e) if attempt < MAX_RETRIES => {
                warn!(attempt, error = %e, "sheet request failed; retrying");
                sleep(RETRY_DELAY).await;
            }
            Err(e) => return Err(e).with_context(|| format!("GET {}", url)),
        }
    }
}
