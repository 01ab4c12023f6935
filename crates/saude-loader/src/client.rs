//! HTTP client for the facility listing endpoint.
//!
//! Wraps `reqwest` with listing-specific status handling and typed
//! deserialization. The endpoint takes no parameters, no body and no
//! credentials: one `GET` returns the whole listing.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::{header, Client, Url};
use saude_core::{AppConfig, Location};

use crate::error::LoaderError;

/// Client for the facility listing endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct LocationClient {
    client: Client,
    url: Url,
}

impl LocationClient {
    /// Creates a client for `api_url`.
    ///
    /// A `timeout_secs` of `0` leaves the request timeout to the transport.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidUrl`] if `api_url` is not an absolute
    /// `http`/`https` URL, or [`LoaderError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(api_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, LoaderError> {
        let url = Url::parse(api_url.trim()).map_err(|e| LoaderError::InvalidUrl {
            url: api_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(LoaderError::InvalidUrl {
                url: api_url.to_owned(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent);
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    /// Creates a client from the resolved application config.
    ///
    /// # Errors
    ///
    /// See [`LocationClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, LoaderError> {
        Self::new(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// The endpoint this client retrieves from.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Retrieves the listing with exactly one `GET` request.
    ///
    /// Locations are returned in delivered order with no filtering or
    /// sorting. Duplicate names are logged and passed through.
    ///
    /// # Errors
    ///
    /// - [`LoaderError::Http`] on network failure.
    /// - [`LoaderError::UnexpectedStatus`] on a non-2xx status.
    /// - [`LoaderError::Deserialize`] if the body is not a JSON array of
    ///   valid location records.
    pub async fn fetch_locations(&self) -> Result<Vec<Location>, LoaderError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        let locations: Vec<Location> =
            serde_json::from_str(&body).map_err(|e| LoaderError::Deserialize {
                context: self.url.to_string(),
                source: e,
            })?;

        warn_on_duplicate_names(&locations);
        Ok(locations)
    }
}

fn warn_on_duplicate_names(locations: &[Location]) {
    let mut seen = HashSet::with_capacity(locations.len());
    for location in locations {
        if !seen.insert(location.key()) {
            tracing::warn!(name = location.key(), "duplicate location name in listing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_http_url() {
        let client = LocationClient::new("http://localhost:5000/api/locations", 30, "test")
            .expect("client construction should not fail");
        assert_eq!(client.url().as_str(), "http://localhost:5000/api/locations");
    }

    #[test]
    fn new_trims_surrounding_whitespace() {
        let client = LocationClient::new(" https://saude.example.org/api/locations\n", 0, "test")
            .expect("client construction should not fail");
        assert_eq!(client.url().host_str(), Some("saude.example.org"));
    }

    #[test]
    fn new_rejects_relative_url() {
        let result = LocationClient::new("/api/locations", 30, "test");
        assert!(matches!(result, Err(LoaderError::InvalidUrl { .. })));
    }

    #[test]
    fn new_rejects_non_http_scheme() {
        let result = LocationClient::new("ftp://example.org/locations.json", 30, "test");
        assert!(
            matches!(result, Err(LoaderError::InvalidUrl { ref reason, .. }) if reason.contains("ftp"))
        );
    }

    #[test]
    fn from_config_uses_configured_endpoint() {
        let config = AppConfig {
            api_url: "http://10.1.2.3:5000/api/locations".to_string(),
            log_level: "debug".to_string(),
            request_timeout_secs: 5,
            user_agent: "saude-test".to_string(),
        };
        let client = LocationClient::from_config(&config).unwrap();
        assert_eq!(client.url().as_str(), "http://10.1.2.3:5000/api/locations");
    }
}
