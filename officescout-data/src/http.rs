//! Blocking JSON client shared by the HTTP collaborators.
//!
//! The [`Geocoder`](officescout_core::Geocoder) and
//! [`VenueSource`](officescout_core::VenueSource) traits are synchronous so
//! the scoring pipeline stays embeddable in synchronous code. [`JsonClient`]
//! bridges them to `reqwest` by blocking on a Tokio runtime it owns.
//!
//! # Runtime behaviour
//!
//! Outside any Tokio runtime the client drives requests on its own
//! current-thread runtime. Inside a multi-threaded runtime (detected via
//! [`Handle::try_current`] and [`RuntimeFlavor::MultiThread`]) it uses that
//! runtime's handle within [`tokio::task::block_in_place`] to avoid nested
//! runtime panics. A current-thread runtime cannot be blocked on from inside
//! itself, so a call made there fails with [`GeoSourceError::Network`] without
//! sending the request.

use std::time::Duration;

use officescout_core::GeoSourceError;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

/// Default user agent for outgoing requests.
pub const DEFAULT_USER_AGENT: &str = "officescout/0.1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while constructing an HTTP collaborator.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The configured base URL could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    BaseUrl {
        /// Configured URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// The configured base URL cannot carry path segments.
    #[error("base URL {url:?} cannot have path segments")]
    OpaqueBaseUrl {
        /// Configured URL.
        url: String,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Parse `base_url` and check it can take path segments.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ClientBuildError> {
    let url = Url::parse(base_url).map_err(|source| ClientBuildError::BaseUrl {
        url: base_url.to_owned(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ClientBuildError::OpaqueBaseUrl {
            url: base_url.to_owned(),
        });
    }
    Ok(url)
}

/// Append `segments` to the path of `base`, percent-encoding each one.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Render `url` without its query string, which may carry credentials.
pub(crate) fn redacted(url: &Url) -> String {
    let mut display = url.clone();
    display.set_query(None);
    display.to_string()
}

/// `reqwest` client paired with the runtime that drives it.
pub(crate) struct JsonClient {
    client: Client,
    runtime: Runtime,
    timeout: Duration,
}

impl std::fmt::Debug for JsonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonClient")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl JsonClient {
    pub(crate) fn new(user_agent: &str, timeout: Duration) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            timeout,
        })
    }

    /// GET `url` and decode the body as JSON, blocking the caller.
    pub(crate) fn get_json(&self, url: Url) -> Result<Value, GeoSourceError> {
        self.get_json_checked(url, |_| Ok(()))
    }

    /// GET `url` like [`Self::get_json`], reading the body of 4xx responses.
    ///
    /// Services that explain a rejected request in its JSON body get that body
    /// handed to `check_error_body`. An error it returns is reported instead
    /// of the bare [`GeoSourceError::Http`] status.
    pub(crate) fn get_json_checked(
        &self,
        url: Url,
        check_error_body: fn(&Value) -> Result<(), GeoSourceError>,
    ) -> Result<Value, GeoSourceError> {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.fetch(url, check_error_body)))
            }
            Ok(_) => Err(GeoSourceError::Network {
                url: redacted(&url),
                message: "cannot block inside a current-thread Tokio runtime".to_owned(),
            }),
            Err(_) => self.runtime.block_on(self.fetch(url, check_error_body)),
        }
    }

    async fn fetch(
        &self,
        url: Url,
        check_error_body: fn(&Value) -> Result<(), GeoSourceError>,
    ) -> Result<Value, GeoSourceError> {
        let display = redacted(&url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_error(err, &display))?;
        let status = response.status();
        if status.is_client_error() {
            let rejected = GeoSourceError::Http {
                url: display,
                status: status.as_u16(),
                message: format!("HTTP status client error ({status})"),
            };
            return match response.json::<Value>().await {
                Ok(body) => check_error_body(&body).and(Err(rejected)),
                Err(_) => Err(rejected),
            };
        }
        response
            .error_for_status()
            .map_err(|err| self.convert_error(err, &display))?
            .json::<Value>()
            .await
            .map_err(|err| GeoSourceError::Parse {
                message: err.to_string(),
            })
    }

    fn convert_error(&self, error: reqwest::Error, url: &str) -> GeoSourceError {
        if error.is_timeout() {
            return GeoSourceError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.timeout.as_secs(),
            };
        }
        // Drop the URL from the message; its query may carry credentials.
        let status = error.status();
        let message = error.without_url().to_string();
        if let Some(status) = status {
            return GeoSourceError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message,
            };
        }
        GeoSourceError::Network {
            url: url.to_owned(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn joins_and_encodes_segments() {
        let base = parse_base_url("https://geocode.xyz/").expect("valid base");
        let url = join_segments(&base, &["1 Market St, San Francisco"]);
        assert_eq!(
            url.as_str(),
            "https://geocode.xyz/1%20Market%20St,%20San%20Francisco"
        );
    }

    #[rstest]
    fn keeps_base_path_prefix() {
        let base = parse_base_url("http://localhost:8080/proxy").expect("valid base");
        let url = join_segments(&base, &["v2", "venues", "explore"]);
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/v2/venues/explore");
    }

    #[rstest]
    fn redaction_drops_query() {
        let url = Url::parse("https://api.example.com/v2?client_secret=s3cret&v=1")
            .expect("valid url");
        assert_eq!(redacted(&url), "https://api.example.com/v2");
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:someone@example.com")]
    fn rejects_unusable_base_urls(#[case] base: &str) {
        assert!(parse_base_url(base).is_err());
    }
}
