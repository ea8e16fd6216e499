use log::debug;

use crate::catalog::Catalog;
use crate::endpoints::Endpoints;
use crate::error::Result;

/// Fetches the command catalog from the server.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl CatalogClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Issues one `GET /api/commands`. There is no retry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::CatalogRequest`] if the request fails or
    /// the server answers with a non-success status, and
    /// [`crate::error::Error::CatalogParse`] if the body is not a valid catalog.
    pub async fn fetch_catalog(&self) -> Result<Catalog> {
        let url = self.endpoints.commands_url();
        debug!("Fetching catalog from `{url}`");

        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Catalog::from_json(&body)
    }
}
