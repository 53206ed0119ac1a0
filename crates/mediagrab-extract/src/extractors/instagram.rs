use mediagrab_core::{
    ExtractionRecord, MediaItem, MediaKind, MediaResult, RecordKind, UNKNOWN_AUTHOR,
};
use regex::Regex;

use super::{Extractor, parse_lenient, path_segments};
use crate::hashing::short_hash;

const CDN: &str = "https://dummy.instagramcdn.com/p";
const SLIDESHOW_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PostPath {
    username: Option<String>,
    shortcode: String,
}

/// Matches `/p/<code>`, `/reel/<code>` and `/<username>/p|reel/<code>`.
fn parse_post_path(input: &str) -> Option<PostPath> {
    let url = parse_lenient(input)?;
    let path = format!("/{}", path_segments(Some(&url)).join("/"));
    let regex = Regex::new(r"^/(?:([^/]+)/)?(?:p|reel)/([^/]+)").ok()?;
    let captures = regex.captures(&path)?;
    Some(PostPath {
        username: captures.get(1).map(|m| m.as_str().to_string()),
        shortcode: captures.get(2)?.as_str().to_string(),
    })
}

#[derive(Debug, Clone, Default)]
pub struct InstagramExtractor;

impl InstagramExtractor {
    /// Post shortcode, else 10 hex chars of the URL hash.
    pub fn shortcode(input: &str) -> String {
        parse_post_path(input)
            .map(|post| post.shortcode)
            .unwrap_or_else(|| short_hash(input, 10))
    }

    pub fn author(input: &str) -> String {
        parse_post_path(input)
            .and_then(|post| post.username)
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
    }

    /// Even leading hex byte means a slideshow. Shortcodes that do not start
    /// with hex digits use the leading byte of their hash instead.
    pub fn is_slideshow(shortcode: &str) -> bool {
        if shortcode.is_empty() {
            return false;
        }
        let prefix: String = shortcode.chars().take(2).collect();
        let value = u8::from_str_radix(&prefix, 16)
            .or_else(|_| u8::from_str_radix(&short_hash(shortcode, 2), 16))
            .unwrap_or(1);
        value % 2 == 0
    }

    fn slideshow_medias(shortcode: &str) -> Vec<MediaItem> {
        (1..=SLIDESHOW_LEN)
            .map(|idx| {
                MediaItem::new(
                    format!("{CDN}/{shortcode}/image_{idx}.jpg"),
                    "standard",
                    "jpg",
                    MediaKind::Image,
                )
            })
            .collect()
    }

    fn single_media(shortcode: &str) -> Vec<MediaItem> {
        vec![MediaItem::new(
            format!("{CDN}/{shortcode}/image.jpg"),
            "standard",
            "jpg",
            MediaKind::Image,
        )]
    }
}

impl Extractor for InstagramExtractor {
    fn source(&self) -> &str {
        "instagram"
    }

    fn extract(&self, url: &str) -> MediaResult<ExtractionRecord> {
        tracing::debug!("extracting instagram url: {url}");
        let shortcode = Self::shortcode(url);
        let author = Self::author(url);

        let (medias, kind) = if Self::is_slideshow(&shortcode) {
            (Self::slideshow_medias(&shortcode), RecordKind::Multiple)
        } else {
            (Self::single_media(&shortcode), RecordKind::Image)
        };

        Ok(ExtractionRecord {
            url: url.to_string(),
            source: self.source().to_string(),
            title: format!("Instagram post {shortcode} by {author}"),
            author,
            thumbnail: format!("{CDN}/{shortcode}/thumbnail.jpg"),
            duration: 0,
            medias,
            kind,
            error: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn odd_shortcode_is_single_image() {
        // 0xAB = 171
        let record = InstagramExtractor
            .extract("https://instagram.com/p/ABCDEF1234/")
            .unwrap();
        assert_eq!(record.kind, RecordKind::Image);
        assert_eq!(record.medias.len(), 1);
        assert_eq!(record.duration, 0);
        assert_eq!(record.author, "unknown");
        assert_eq!(
            record.medias[0].url,
            "https://dummy.instagramcdn.com/p/ABCDEF1234/image.jpg"
        );
        assert_eq!(record.title, "Instagram post ABCDEF1234 by unknown");
    }

    #[test]
    fn even_shortcode_is_slideshow() {
        // 0xC0 = 192
        let record = InstagramExtractor
            .extract("https://www.instagram.com/reel/C0ffee/")
            .unwrap();
        assert_eq!(record.kind, RecordKind::Multiple);
        assert_eq!(record.medias.len(), 3);
        assert_eq!(
            record.medias[2].url,
            "https://dummy.instagramcdn.com/p/C0ffee/image_3.jpg"
        );
        assert!(record.medias.iter().all(|m| m.kind == MediaKind::Image));
    }

    #[test]
    fn reads_author_from_username_pattern() {
        let url = "https://www.instagram.com/bob/p/ABCDEF1234/";
        assert_eq!(InstagramExtractor::author(url), "bob");
        assert_eq!(InstagramExtractor::shortcode(url), "ABCDEF1234");
    }

    #[test]
    fn hashes_url_when_not_a_post() {
        let url = "https://www.instagram.com/stories/bob/";
        assert_eq!(InstagramExtractor::shortcode(url), short_hash(url, 10));
        assert_eq!(InstagramExtractor::author(url), "unknown");
    }

    #[test]
    fn non_hex_shortcode_is_decided_by_hash() {
        let expected = u8::from_str_radix(&short_hash("Zz9", 2), 16).unwrap() % 2 == 0;
        assert_eq!(InstagramExtractor::is_slideshow("Zz9"), expected);
        let record = InstagramExtractor
            .extract("https://instagram.com/p/Zz9/")
            .unwrap();
        assert!(!record.error);
    }

    #[test]
    fn single_hex_char_shortcode() {
        assert!(InstagramExtractor::is_slideshow("4"));
        assert!(!InstagramExtractor::is_slideshow("5"));
    }
}
