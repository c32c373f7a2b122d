//! HTTP client for a running nestwatch server.
//!
//! Used by the dashboard side to pull site lists. [`fetch_sites`] logs errors
//! and degrades to an empty list.

use crate::error::{Error, Result};
use crate::site::Site;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Path of the site list endpoint.
pub const SITES_PATH: &str = "/api/sites";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch all sites from `base_url`, returning an empty list on any failure.
pub async fn fetch_sites(base_url: &str) -> Vec<Site> {
    match try_fetch_sites(base_url).await {
        Ok(sites) => {
            debug!("Fetched {} site(s) from {base_url}", sites.len());
            sites
        }
        Err(e) => {
            warn!("Failed to fetch sites: {}", e.chain_message());
            Vec::new()
        }
    }
}

/// Fetch all sites from `base_url`, reporting failures.
pub async fn try_fetch_sites(base_url: &str) -> Result<Vec<Site>> {
    let url = sites_url(base_url);

    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| Error::Internal {
            message: format!("Failed to create HTTP client: {e}"),
        })?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::RemoteFetch {
            url: url.clone(),
            source: Box::new(e),
        })?;

    if !response.status().is_success() {
        return Err(Error::RemoteFetch {
            url,
            source: format!("HTTP {}", response.status()).into(),
        });
    }

    response
        .json::<Vec<Site>>()
        .await
        .map_err(|e| Error::RemoteFetch {
            url,
            source: Box::new(e),
        })
}

/// Join `base_url` and the site list path without doubling the slash.
pub fn sites_url(base_url: &str) -> String {
    format!("{}{SITES_PATH}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sites_url_trims_trailing_slash() {
        assert_eq!(
            sites_url("http://localhost:5080/"),
            "http://localhost:5080/api/sites"
        );
        assert_eq!(
            sites_url("http://localhost:5080"),
            "http://localhost:5080/api/sites"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_yields_empty_list() {
        // Port 9 (discard) on loopback is expected to refuse connections.
        let sites = fetch_sites("http://127.0.0.1:9").await;
        assert!(sites.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_is_reported() {
        let result = try_fetch_sites("not a url").await;
        assert!(matches!(result, Err(Error::RemoteFetch { .. })));
    }
}
