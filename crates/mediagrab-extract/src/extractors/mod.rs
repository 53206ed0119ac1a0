mod generic;
mod instagram;
mod tiktok;
mod youtube;

use mediagrab_core::{ExtractionRecord, MediaResult};
use url::Url;

pub use generic::GenericExtractor;
pub use instagram::InstagramExtractor;
pub use tiktok::TikTokExtractor;
pub use youtube::YouTubeExtractor;

/// Builds a record for a single URL.
///
/// Built-in extractors never fail: anything they cannot parse out of the URL
/// is derived from a hash of it, so repeated calls yield identical records.
/// The `Result` exists so the pipeline can contain failures from any
/// implementation.
pub trait Extractor: Send + Sync {
    /// Platform tag written to `ExtractionRecord::source`.
    fn source(&self) -> &str;

    fn extract(&self, url: &str) -> MediaResult<ExtractionRecord>;
}

/// Parses `input`, reading a scheme-less string such as `tiktok.com/@a/video/1`
/// as a bare path with no host. Host-based checks therefore do not match it.
pub(crate) fn parse_lenient(input: &str) -> Option<Url> {
    Url::parse(input)
        .ok()
        .or_else(|| Url::parse("path:/").ok()?.join(input).ok())
}

/// Non-empty path segments of a URL. Unparseable URLs have none.
pub(crate) fn path_segments(url: Option<&Url>) -> Vec<String> {
    url.and_then(|url| url.path_segments())
        .map(|segments| {
            segments
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// First non-empty value of a query parameter.
pub(crate) fn query_value(url: Option<&Url>, key: &str) -> Option<String> {
    url?.query_pairs()
        .find(|(name, value)| name == key && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}
