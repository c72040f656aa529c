//! Minimal HAR 1.2 structures for importing captured requests.

use crate::capture::{CaptureError, CapturedRequest};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Root HAR log (top-level wrapper).
#[derive(Debug, Deserialize)]
struct HarLog {
    log: HarRoot,
}

#[derive(Debug, Deserialize)]
struct HarRoot {
    #[serde(default)]
    entries: Vec<HarEntry>,
}

#[derive(Debug, Deserialize)]
struct HarEntry {
    request: HarRequest,
}

#[derive(Debug, Deserialize)]
struct HarRequest {
    method: String,
    url: String,
    #[serde(default)]
    headers: Vec<HarHeader>,
    #[serde(default, rename = "postData")]
    post_data: Option<HarPostData>,
}

#[derive(Debug, Deserialize)]
struct HarHeader {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct HarPostData {
    #[serde(default)]
    text: Option<String>,
}

/// Reads a HAR file and returns its requests in capture order
pub fn load_har(path: &Path) -> Result<Vec<CapturedRequest>, CaptureError> {
    let content = std::fs::read_to_string(path)?;
    parse_har(&content)
}

/// Parses HAR JSON text into captured requests
///
/// Host and path come from the request URL; if it does not parse, the whole
/// URL is kept as the path and the host is left empty.
pub fn parse_har(content: &str) -> Result<Vec<CapturedRequest>, CaptureError> {
    let har: HarLog = serde_json::from_str(content)?;

    let requests = har
        .log
        .entries
        .into_iter()
        .map(|entry| into_captured(entry.request))
        .collect::<Vec<_>>();

    tracing::debug!("Imported {} captured requests", requests.len());
    Ok(requests)
}

fn into_captured(request: HarRequest) -> CapturedRequest {
    let (host, path) = match Url::parse(&request.url) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default().to_string();
            let path = match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            };
            (host, path)
        }
        Err(e) => {
            tracing::warn!("Captured URL {} did not parse: {}", request.url, e);
            (String::new(), request.url.clone())
        }
    };

    let request_body = request
        .post_data
        .and_then(|data| data.text)
        .filter(|text| !text.is_empty());

    CapturedRequest {
        method: request.method.to_uppercase(),
        url: request.url,
        host,
        path,
        request_headers: request
            .headers
            .into_iter()
            .map(|header| (header.name, header.value))
            .collect(),
        request_body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_har_extracts_requests() {
        let har = r#"{
            "log": {
                "version": "1.2",
                "entries": [
                    {
                        "request": {
                            "method": "post",
                            "url": "https://api.example.com/v1/login?next=home",
                            "headers": [
                                { "name": "Content-Type", "value": "application/json" },
                                { "name": "X-Trace", "value": "1" }
                            ],
                            "postData": { "mimeType": "application/json", "text": "{\"u\":\"a\"}" }
                        },
                        "response": { "status": 200, "headers": [] }
                    },
                    {
                        "request": { "method": "GET", "url": "https://cdn.example.com/", "headers": [] },
                        "response": { "status": 304, "headers": [] }
                    }
                ]
            }
        }"#;

        let requests = parse_har(har).unwrap();
        assert_eq!(requests.len(), 2);

        let login = &requests[0];
        assert_eq!(login.method, "POST");
        assert_eq!(login.host, "api.example.com");
        assert_eq!(login.path, "/v1/login?next=home");
        assert_eq!(login.request_headers[0].0, "Content-Type");
        assert_eq!(login.request_headers[1].0, "X-Trace");
        assert_eq!(login.request_body.as_deref(), Some("{\"u\":\"a\"}"));

        assert_eq!(requests[1].path, "/");
        assert_eq!(requests[1].request_body, None);
    }

    #[test]
    fn parse_har_keeps_unparseable_url_as_path() {
        let har = r#"{"log":{"entries":[{"request":{"method":"GET","url":"not a url"}}]}}"#;
        let requests = parse_har(har).unwrap();
        assert_eq!(requests[0].host, "");
        assert_eq!(requests[0].path, "not a url");
    }

    #[test]
    fn parse_har_empty_post_text_is_no_body() {
        let har = r#"{"log":{"entries":[{"request":{"method":"PUT","url":"https://a.example.com/x","postData":{"text":""}}}]}}"#;
        let requests = parse_har(har).unwrap();
        assert_eq!(requests[0].request_body, None);
    }

    #[test]
    fn parse_har_rejects_invalid_json() {
        assert!(matches!(parse_har("{ nope"), Err(CaptureError::Parse(_))));
    }

    #[test]
    fn load_har_from_file() {
        let har = r#"{"log":{"entries":[{"request":{"method":"DELETE","url":"https://a.example.com/v1/items/7"}}]}}"#;
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(har.as_bytes()).unwrap();
        f.flush().unwrap();

        let requests = load_har(f.path()).unwrap();
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].path, "/v1/items/7");
    }

    #[test]
    fn load_har_missing_file() {
        assert!(matches!(
            load_har(Path::new("/nonexistent/capture.har")),
            Err(CaptureError::Io(_))
        ));
    }
}
