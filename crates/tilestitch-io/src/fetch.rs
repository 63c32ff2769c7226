//! Fetching tile bytes.

use crate::{Result, StitchIoError};
use std::io::Read;
use std::time::Duration;
use tracing::{debug, trace};

/// User agent sent with every tile request.
pub const USER_AGENT: &str = "tile-stitch/1.0.0";

/// Extra capacity reserved beyond the advertised body length.
const BODY_SLACK: usize = 50_000;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Source of raw tile bytes for an expanded URL.
pub trait TileFetcher {
    /// Fetch the body at `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP fetcher. Redirects are followed.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default user agent and timeout.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl TileFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Fetching {}", url);
        let mut response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(StitchIoError::FetchFailed {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let advertised = response.content_length().unwrap_or(0) as usize;
        let mut body = Vec::with_capacity(advertised + BODY_SLACK);
        response.read_to_end(&mut body)?;
        trace!("Fetched {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
