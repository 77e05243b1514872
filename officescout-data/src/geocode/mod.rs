//! Address geocoding against the geocode.xyz JSON API.
//!
//! [`HttpGeocoder`] implements [`Geocoder`] by requesting
//! `{base_url}/{address}?json=1` and reading the string fields `longt` and
//! `latt`. A body carrying `"success": false` is the service's way of saying
//! it could not resolve the address and maps to [`Geocoded::Rejected`];
//! callers decide whether to substitute a fallback via
//! [`resolve_origin`](officescout_core::resolve_origin).
//!
//! # Example
//!
//! ```no_run
//! use officescout_core::{Geocoder, resolve_origin, source::DEFAULT_FALLBACK_ORIGIN};
//! use officescout_data::geocode::{HttpGeocoder, HttpGeocoderConfig};
//! use std::time::Duration;
//!
//! let config = HttpGeocoderConfig::default().with_timeout(Duration::from_secs(10));
//! let geocoder = HttpGeocoder::with_config(config)?;
//! let origin = resolve_origin(&geocoder, "San Francisco", DEFAULT_FALLBACK_ORIGIN)?;
//! println!("searching around {origin:?}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod response;

use std::time::Duration;

use log::debug;
use officescout_core::{GeoSourceError, Geocoded, Geocoder};
use url::Url;

use crate::http::{
    ClientBuildError, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, JsonClient, join_segments,
    parse_base_url,
};

pub use response::parse_geocode_response;

/// Public geocode.xyz endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://geocode.xyz";

/// Configuration for [`HttpGeocoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpGeocoderConfig {
    /// Service root, such as `"https://geocode.xyz"`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with each request.
    pub user_agent: String,
}

impl Default for HttpGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpGeocoderConfig {
    /// Create a configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Geocoder backed by the geocode.xyz HTTP API.
#[derive(Debug)]
pub struct HttpGeocoder {
    base_url: Url,
    client: JsonClient,
}

impl HttpGeocoder {
    /// Create a geocoder for the service at `base_url` with default settings.
    ///
    /// # Errors
    /// Returns [`ClientBuildError`] when the URL is unusable or the HTTP
    /// client or runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpGeocoderConfig::new(base_url))
    }

    /// Create a geocoder from explicit configuration.
    ///
    /// # Errors
    /// Returns [`ClientBuildError`] when the URL is unusable or the HTTP
    /// client or runtime fails to build.
    pub fn with_config(config: HttpGeocoderConfig) -> Result<Self, ClientBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = JsonClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { base_url, client })
    }

    fn request_url(&self, address: &str) -> Url {
        let mut url = join_segments(&self.base_url, &[address]);
        url.query_pairs_mut().append_pair("json", "1");
        url
    }
}

impl Geocoder for HttpGeocoder {
    fn geocode(&self, address: &str) -> Result<Geocoded, GeoSourceError> {
        let body = self.client.get_json(self.request_url(address))?;
        let geocoded = parse_geocode_response(&body)?;
        debug!("geocoded {address:?} as {geocoded:?}");
        Ok(geocoded)
    }
}
