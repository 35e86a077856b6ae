//! reqwest-backed catalog source.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::{CatalogError, CatalogSource};
use crate::state::{ApiItem, CatalogItem};

/// Catalog source fetching the whole catalog from one HTTP endpoint.
#[derive(Clone, Debug)]
pub struct HttpCatalogSource {
    /// Shared client; connection pooling is enabled by default in `reqwest::Client`.
    client: reqwest::Client,
    /// Endpoint returning a JSON array of items.
    url: String,
}

impl HttpCatalogSource {
    /// What: Build a source for `url` with the given timeouts.
    ///
    /// Inputs:
    /// - `url`: Catalog endpoint
    /// - `connect_timeout`: Maximum time to establish a connection
    /// - `timeout`: Maximum time for the whole request
    ///
    /// Output:
    /// - `Ok(HttpCatalogSource)`; `Err(CatalogError::Network)` if the client cannot be built.
    ///
    /// # Errors
    /// - Returns `Err` when the TLS backend or client configuration fails to initialize.
    pub fn new(
        url: impl Into<String>,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(format!("catalog-scroll/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Endpoint this source reads from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        debug!(url = %self.url, "fetching catalog");
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            warn!(
                url = %self.url,
                status = status.as_u16(),
                "catalog endpoint returned non-success status"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        let items = decode_catalog(&body)?;
        info!(bytes = body.len(), items = items.len(), "fetched catalog");
        Ok(items)
    }
}

/// What: Decode an API response body into catalog items.
///
/// Inputs:
/// - `body`: JSON text; an array of items or `null`
///
/// Output:
/// - Items in response order; `null` yields an empty catalog.
///
/// # Errors
/// - Returns `CatalogError::Decode` when the body is not a JSON array of items.
pub fn decode_catalog(body: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    let raw: Option<Vec<ApiItem>> =
        serde_json::from_str(body).map_err(|e| CatalogError::Decode(e.to_string()))?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(CatalogItem::from)
        .collect())
}
