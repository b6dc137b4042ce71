//! SVG asset fetching.
//!
//! Single attempt, no retry, no caching. A missing icon surfaces as an
//! HTTP 404 status error (the CDN 404s invalid triples).

use std::sync::LazyLock;
use std::time::Duration;

use thiserror::Error;

/// Fetch-related errors.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("CDN returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Shared agent so connection setup is paid once per process.
static AGENT: LazyLock<ureq::Agent> = LazyLock::new(|| {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("iconex/", env!("CARGO_PKG_VERSION")))
        .build()
});

/// Fetch the vector source text for an icon URL.
pub fn fetch_svg(url: &str) -> Result<String, FetchError> {
    crate::debug!("fetch"; "GET {}", url);

    let response = AGENT.get(url).call().map_err(|err| match err {
        ureq::Error::Status(status, _) => FetchError::Status {
            status,
            url: url.to_string(),
        },
        other => FetchError::Transport {
            url: url.to_string(),
            source: Box::new(other),
        },
    })?;

    response.into_string().map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })
}
