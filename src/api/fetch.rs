//! Generic HTTP fetching and the per-league fan-out

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::error::ApiError;
use crate::models::{EntityRecord, League};

/// Fetches a URL and parses the response body as JSON.
///
/// Any non-success status fails the call with an error carrying the status
/// code and URL; there is no retry and no partial tolerance, the error is
/// the caller's to handle.
///
/// # Arguments
/// * `client` - HTTP client for making requests
/// * `url` - URL to fetch data from
///
/// # Returns
/// * `Result<T, ApiError>` - Parsed response data or error
#[instrument(skip(client))]
pub(crate) async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, ApiError> {
    debug!("Fetching data from URL: {url}");

    let response = client.get(url).send().await?;
    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        return Err(match status_code {
            404 => ApiError::not_found(url),
            400..=499 => ApiError::client_error(status_code, reason, url),
            _ => ApiError::server_error(status_code, reason, url),
        });
    }

    let response_text = response.text().await?;
    debug!("Response length: {} bytes", response_text.len());

    match serde_json::from_str::<T>(&response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);

            let trimmed = response_text.trim_start();
            if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(ApiError::malformed_json("Response is not valid JSON", url))
            } else {
                // Valid JSON but not the shape we asked for
                Err(ApiError::unexpected_structure(e.to_string(), url))
            }
        }
    }
}

/// Issues one request per league concurrently and concatenates the resulting
/// record pages in the order `leagues` was given, not in completion order.
///
/// The first failing league fails the whole fan-out; sibling requests are
/// dropped and no partial result is returned.
///
/// # Arguments
/// * `client` - HTTP client for making requests
/// * `leagues` - Non-empty, ordered league set
/// * `build_url` - Maps each league to the URL to fetch for it
#[instrument(skip(client, build_url), fields(league_count = leagues.len()))]
pub async fn fetch_across_leagues(
    client: &Client,
    leagues: &[League],
    build_url: impl Fn(League) -> String,
) -> Result<Vec<EntityRecord>, ApiError> {
    if leagues.is_empty() {
        return Err(ApiError::EmptyLeagues);
    }

    let requests = leagues.iter().map(|&league| {
        let url = build_url(league);
        async move {
            let records: Vec<EntityRecord> = fetch(client, &url).await?;
            debug!("League {} returned {} records", league, records.len());
            Ok::<_, ApiError>(records)
        }
    });

    let pages = futures::future::try_join_all(requests).await?;
    let merged: Vec<EntityRecord> = pages.into_iter().flatten().collect();

    info!(
        "Fan-out across {} league(s) merged {} records",
        leagues.len(),
        merged.len()
    );
    Ok(merged)
}
