//! REST Countries source.
//!
//! One `GET` against a fixed endpoint returning a JSON array of country
//! records. No pagination, no query parameters, no auth, no retry.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::catalog::{ApiCountry, Country, CountrySource, SourceError};

pub const DEFAULT_ENDPOINT: &str = "https://restcountries.com/v3.1/all";

/// REST Countries API source
pub struct RestCountriesSource {
    endpoint: String,
    client: reqwest::Client,
}

impl RestCountriesSource {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError> {
        info!("Fetching countries from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        debug!("Countries response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Countries API error: {} - {}", status, err_body);
            return Err(SourceError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let records: Vec<ApiCountry> =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;

        info!("Fetched {} countries", records.len());
        Ok(records.into_iter().map(Country::from).collect())
    }
}
