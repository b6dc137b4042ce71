//! Remote asset host access: URL construction and SVG fetching.

mod fetch;
mod url;

pub use fetch::{FetchError, fetch_svg};
pub use url::{DEFAULT_BASE_URL, icon_url};
