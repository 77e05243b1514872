//! Venue discovery through the Foursquare Places `venues/explore` API.
//!
//! [`FoursquareVenueSource`] implements [`VenueSource`] with the userless
//! (client id and secret) flavour of the v2 API. Credentials live in an
//! explicit [`FoursquareConfig`] handed over at construction; nothing is read
//! from the environment here.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use officescout_core::{VenueQuery, VenueSource};
//! use officescout_data::venues::{FoursquareConfig, FoursquareVenueSource};
//!
//! let config = FoursquareConfig::new("CLIENT_ID", "CLIENT_SECRET");
//! let source = FoursquareVenueSource::with_config(config)?;
//! let query = VenueQuery::new(Coord { x: -122.4194, y: 37.7749 }, "4bf58dd8d48988d1e0931735");
//! let venues = source.fetch_venues(&query)?;
//! println!("found {} coffee shops", venues.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod explore;

use std::fmt;
use std::time::Duration;

use log::debug;
use officescout_core::{GeoSourceError, Venue, VenueQuery, VenueSource};
use url::Url;

use crate::http::{
    ClientBuildError, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, JsonClient, join_segments,
    parse_base_url,
};

pub use explore::parse_explore_response;

/// Public Foursquare API root.
pub const DEFAULT_FOURSQUARE_URL: &str = "https://api.foursquare.com";

/// API version date sent as the `v` parameter.
pub const DEFAULT_API_VERSION: &str = "20180323";

/// Credentials and connection settings for [`FoursquareVenueSource`].
#[derive(Clone, PartialEq, Eq)]
pub struct FoursquareConfig {
    /// Application client identifier.
    pub client_id: String,
    /// Application client secret.
    pub client_secret: String,
    /// API version date, `YYYYMMDD`.
    pub version: String,
    /// Service root, such as `"https://api.foursquare.com"`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with each request.
    pub user_agent: String,
}

impl fmt::Debug for FoursquareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoursquareConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("version", &self.version)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl FoursquareConfig {
    /// Create a configuration for the public API with the given credentials.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            version: DEFAULT_API_VERSION.to_owned(),
            base_url: DEFAULT_FOURSQUARE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Point the source at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the API version date.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
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

/// Venue source backed by Foursquare's `venues/explore` endpoint.
#[derive(Debug)]
pub struct FoursquareVenueSource {
    endpoint: Url,
    config: FoursquareConfig,
    client: JsonClient,
}

impl FoursquareVenueSource {
    /// Create a source from explicit configuration.
    ///
    /// # Errors
    /// Returns [`ClientBuildError`] when the base URL is unusable or the HTTP
    /// client or runtime fails to build.
    pub fn with_config(config: FoursquareConfig) -> Result<Self, ClientBuildError> {
        let base = parse_base_url(&config.base_url)?;
        let endpoint = join_segments(&base, &["v2", "venues", "explore"]);
        let client = JsonClient::new(&config.user_agent, config.timeout)?;
        Ok(Self {
            endpoint,
            config,
            client,
        })
    }

    fn request_url(&self, query: &VenueQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("client_secret", &self.config.client_secret)
            .append_pair("v", &self.config.version)
            .append_pair(
                "ll",
                &format!("{},{}", query.origin.y, query.origin.x),
            )
            .append_pair("categoryId", &query.category)
            .append_pair("radius", &query.radius_meters.to_string())
            .append_pair("limit", &query.limit.to_string());
        url
    }
}

impl VenueSource for FoursquareVenueSource {
    fn fetch_venues(&self, query: &VenueQuery) -> Result<Vec<Venue>, GeoSourceError> {
        let body = self
            .client
            .get_json_checked(self.request_url(query), explore::check_meta)?;
        let venues = parse_explore_response(&body)?;
        debug!(
            "fetched {} venues for category {} around {:?}",
            venues.len(),
            query.category,
            (query.origin.x, query.origin.y)
        );
        Ok(venues)
    }
}
