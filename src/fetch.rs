use std::time::Duration;

use log::debug;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

/// Bounded-timeout retrieval with browser-mimicking headers.
///
/// Every failure mode (transport error, non-2xx status, unreadable body)
/// is a soft failure: callers get `None` and the scan moves on. There are
/// no retries; this is a best-effort crawl, not a guaranteed one.
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_text(&self, url: &str, timeout: Duration) -> Option<String> {
        let response = match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!("request to {url} failed: {err}");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("request to {url} returned {}", response.status());
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(err) => {
                debug!("reading body from {url} failed: {err}");
                None
            }
        }
    }
}
