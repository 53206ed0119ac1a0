use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    TikTok,
    YouTube,
    Instagram,
    Facebook,
    Reddit,
    Spotify,
    Unknown,
}

/// Host substrings per platform, in match priority order.
const HOST_PATTERNS: &[(Platform, &[&str])] = &[
    (Platform::TikTok, &["tiktok.com"]),
    (Platform::YouTube, &["youtube.com", "youtu.be"]),
    (Platform::Instagram, &["instagram.com", "instagr.am"]),
    (Platform::Facebook, &["facebook.com", "fb.watch"]),
    (Platform::Reddit, &["reddit.com"]),
    (Platform::Spotify, &["spotify.com"]),
];

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::TikTok => "tiktok",
            Platform::YouTube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Reddit => "reddit",
            Platform::Spotify => "spotify",
            Platform::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a URL by its host. Unparseable URLs and unmatched hosts are `Unknown`.
pub fn detect_platform(input: &str) -> Platform {
    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!("failed to parse url {input}: {err}");
            return Platform::Unknown;
        }
    };
    let Some(host) = url.host_str() else {
        return Platform::Unknown;
    };
    let host = host.to_lowercase();

    HOST_PATTERNS
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| host.contains(needle)))
        .map(|(platform, _)| *platform)
        .unwrap_or(Platform::Unknown)
}

#[cfg(test)]
mod tests {
    use super::{Platform, detect_platform};

    #[test]
    fn detects_every_listed_platform() {
        let cases = [
            ("https://www.tiktok.com/@alice/video/1", Platform::TikTok),
            ("https://vm.tiktok.com/ZMabc/", Platform::TikTok),
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", Platform::YouTube),
            ("https://youtu.be/dQw4w9WgXcQ", Platform::YouTube),
            ("https://www.instagram.com/p/ABC/", Platform::Instagram),
            ("https://instagr.am/p/ABC/", Platform::Instagram),
            ("https://m.facebook.com/watch/?v=1", Platform::Facebook),
            ("https://fb.watch/xyz/", Platform::Facebook),
            ("https://old.reddit.com/r/rust/", Platform::Reddit),
            ("https://open.spotify.com/track/4Km5HrUvYTaSUfiSGPJeQR", Platform::Spotify),
        ];
        for (url, expected) in cases {
            assert_eq!(detect_platform(url), expected, "url: {url}");
        }
    }

    #[test]
    fn host_match_is_case_insensitive() {
        assert_eq!(detect_platform("https://WWW.TikTok.COM/@a/video/1"), Platform::TikTok);
    }

    #[test]
    fn only_the_host_is_considered() {
        assert_eq!(
            detect_platform("https://example.com/redirect/tiktok.com/video/1"),
            Platform::Unknown
        );
    }

    #[test]
    fn unmatched_or_invalid_urls_are_unknown() {
        assert_eq!(detect_platform("https://vimeo.com/123"), Platform::Unknown);
        assert_eq!(detect_platform("not-a-url"), Platform::Unknown);
        assert_eq!(detect_platform(""), Platform::Unknown);
    }

    #[test]
    fn tags_are_lowercase_names() {
        assert_eq!(Platform::YouTube.as_str(), "youtube");
        assert_eq!(Platform::Unknown.to_string(), "unknown");
    }
}
