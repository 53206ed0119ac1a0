use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::{MediaError, MediaResult};

/// Reads the URL list from a JSON input file.
///
/// Accepted shapes:
/// - `["https://...", ...]`
/// - `[{"url": "https://..."}, ...]` (elements without a string `url` are skipped)
/// - `{"urls": [...]}` (non-string entries are stringified)
pub fn load_input_urls(path: &Path) -> MediaResult<Vec<String>> {
    if !path.exists() {
        return Err(MediaError::InvalidInput(format!(
            "input file {} does not exist",
            path.display()
        )));
    }
    let content = fs::read_to_string(path).map_err(|err| {
        MediaError::InvalidInput(format!("failed to read input file {}: {err}", path.display()))
    })?;
    let urls = parse_input_urls(&content)?;
    tracing::debug!("loaded {} url(s) from {}", urls.len(), path.display());
    Ok(urls)
}

pub fn parse_input_urls(content: &str) -> MediaResult<Vec<String>> {
    let data: Value = serde_json::from_str(content)
        .map_err(|err| MediaError::Parse(format!("failed to parse input json: {err}")))?;

    match data {
        Value::Array(items) => {
            if items.iter().all(Value::is_string) {
                return Ok(items
                    .into_iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect());
            }
            Ok(items
                .iter()
                .filter_map(|item| item.get("url").and_then(Value::as_str))
                .map(str::to_string)
                .collect())
        }
        Value::Object(mut map) => match map.remove("urls") {
            Some(Value::Array(urls)) => Ok(urls
                .into_iter()
                .map(|url| match url {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect()),
            _ => Err(unsupported_shape()),
        },
        _ => Err(unsupported_shape()),
    }
}

fn unsupported_shape() -> MediaError {
    MediaError::UnsupportedInput(
        "expected a list of URLs, a list of objects with 'url' fields, or an object with a 'urls' list"
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_plain_url_list() {
        let urls = parse_input_urls(r#"["https://a.com/1", "https://b.com/2"]"#).unwrap();
        assert_eq!(urls, vec!["https://a.com/1", "https://b.com/2"]);
    }

    #[test]
    fn parses_objects_with_url_field() {
        let urls = parse_input_urls(
            r#"[{"url": "https://a.com/1", "note": "x"}, {"other": 1}, 5, {"url": "https://b.com"}]"#,
        )
        .unwrap();
        assert_eq!(urls, vec!["https://a.com/1", "https://b.com"]);
    }

    #[test]
    fn parses_urls_field_and_stringifies_entries() {
        let urls = parse_input_urls(r#"{"urls": ["https://a.com", 42]}"#).unwrap();
        assert_eq!(urls, vec!["https://a.com", "42"]);
    }

    #[test]
    fn empty_list_is_empty_batch() {
        assert!(parse_input_urls("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_unsupported_shapes() {
        for content in [r#"{"links": []}"#, r#"{"urls": "https://a.com"}"#, r#""https://a.com""#, "7"] {
            let result = parse_input_urls(content);
            assert!(
                matches!(result, Err(MediaError::UnsupportedInput(_))),
                "expected unsupported input for {content}"
            );
        }
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(parse_input_urls("[not json"), Err(MediaError::Parse(_))));
    }

    #[test]
    fn missing_file_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_input_urls(&dir.path().join("missing.json"));
        match result {
            Err(MediaError::InvalidInput(msg)) => assert!(msg.contains("does not exist")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn loads_urls_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        fs::write(&path, r#"{"urls": ["https://youtu.be/abc"]}"#).unwrap();
        assert_eq!(load_input_urls(&path).unwrap(), vec!["https://youtu.be/abc"]);
    }
}
