//! Main-document resolution from devtools-style network records.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use charset_core::document::{ResponseHeader, ResponseHeaders};

/// The subset of a network record needed to find the main document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    pub url: String,
    #[serde(default)]
    pub response_headers: Vec<ResponseHeader>,
}

/// Read a JSON array of `{name, value}` headers.
pub fn load_headers(path: &Path) -> Result<ResponseHeaders> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read headers from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid headers JSON in {}", path.display()))
}

/// Read a JSON array of network records.
pub fn load_records(path: &Path) -> Result<Vec<NetworkRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read network records from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid network records JSON in {}", path.display()))
}

/// Headers of the record whose URL equals `final_url`, ignoring fragments.
pub fn main_document_headers(
    records: &[NetworkRecord],
    final_url: &str,
) -> Result<ResponseHeaders> {
    let target = without_fragment(final_url)
        .with_context(|| format!("Invalid final URL '{}'", final_url))?;

    let record = records
        .iter()
        .find(|r| without_fragment(&r.url).is_ok_and(|u| u == target))
        .with_context(|| format!("No network record for main document {}", target))?;

    log::debug!(
        "Main document record {} has {} response headers",
        record.url,
        record.response_headers.len()
    );
    Ok(ResponseHeaders::from(record.response_headers.clone()))
}

fn without_fragment(raw: &str) -> std::result::Result<Url, url::ParseError> {
    let mut url = Url::parse(raw)?;
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDS: &str = r#"[
        {"url": "https://example.com/app.js", "responseHeaders": [
            {"name": "content-type", "value": "application/javascript; charset=utf-8"}
        ]},
        {"url": "https://example.com/", "responseHeaders": [
            {"name": "Content-Type", "value": "text/html"}
        ]},
        {"url": "https://example.com/favicon.ico"}
    ]"#;

    #[test]
    fn test_finds_main_document() {
        let records: Vec<NetworkRecord> = serde_json::from_str(RECORDS).unwrap();
        let headers = main_document_headers(&records, "https://example.com/").unwrap();
        assert_eq!(headers.get("content-type"), Some("text/html"));
    }

    #[test]
    fn test_ignores_fragment_and_normalizes() {
        let records: Vec<NetworkRecord> = serde_json::from_str(RECORDS).unwrap();
        let headers = main_document_headers(&records, "https://EXAMPLE.com#top").unwrap();
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_missing_main_document() {
        let records: Vec<NetworkRecord> = serde_json::from_str(RECORDS).unwrap();
        assert!(main_document_headers(&records, "https://example.org/").is_err());
        assert!(main_document_headers(&records, "not a url").is_err());
    }

    #[test]
    fn test_record_without_headers() {
        let records: Vec<NetworkRecord> = serde_json::from_str(RECORDS).unwrap();
        let headers = main_document_headers(&records, "https://example.com/favicon.ico").unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_load_headers_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headers.json");
        std::fs::write(&path, r#"[{"name":"Content-Type","value":"text/html; charset=utf-8"}]"#)
            .unwrap();

        let headers = load_headers(&path).unwrap();
        assert_eq!(headers.get("content-type"), Some("text/html; charset=utf-8"));

        std::fs::write(&path, "{not json").unwrap();
        assert!(load_headers(&path).is_err());
    }
}
