//! Request normalization pipeline.
//!
//! # Responsibilities
//! - Capture headers, joining multi-valued headers with `", "`
//! - Extract first-value-only query parameters
//! - Classify the body by content type and decode it
//! - Assemble the immutable [`RequestRecord`]
//!
//! # Design Decisions
//! - Content types are matched exactly and case-sensitively; a charset
//!   suffix makes the type unsupported
//! - Each decode branch is a pure function from bytes to a partial record
//!   update, so every branch is unit-testable on its own
//! - A malformed JSON body is a diagnostic, not a failure: the record is
//!   produced without a body and the request still succeeds

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::http::{header, HeaderMap, Method, Uri};
use url::form_urlencoded;

use crate::record::RequestRecord;

/// Console and wire timestamp format (`DD.MM.YY HH:MM:SS`).
const TIMESTAMP_FORMAT: &str = "%d.%m.%y %H:%M:%S";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Body encodings the catcher decodes, classified from `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Form,
    Json,
    Unsupported,
}

impl BodyKind {
    /// Exact, case-sensitive match against the two supported content types.
    pub fn classify(content_type: Option<&str>) -> Self {
        match content_type {
            Some(FORM_CONTENT_TYPE) => Self::Form,
            Some(JSON_CONTENT_TYPE) => Self::Json,
            _ => Self::Unsupported,
        }
    }
}

/// Build one [`RequestRecord`] from the transport-level pieces of a request.
///
/// The sequence number is claimed by the caller; everything else is derived
/// here. No carry-over state between calls.
pub fn normalize(
    sequence_number: u64,
    method: &Method,
    uri: &Uri,
    remote_address: SocketAddr,
    headers: &HeaderMap,
    body: &[u8],
) -> RequestRecord {
    let mut record = RequestRecord {
        sequence_number,
        timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        method: method.to_string(),
        request_uri: uri.to_string(),
        remote_address: remote_address.to_string(),
        headers: capture_headers(headers),
        url_params: url_params(uri),
        form_data: None,
        body: None,
    };

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    match BodyKind::classify(content_type) {
        BodyKind::Form => record.form_data = decode_form(body),
        BodyKind::Json => record.body = decode_json(sequence_number, body),
        BodyKind::Unsupported => {}
    }

    record
}

/// Every header name once, values joined with `", "`.
fn capture_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut captured = BTreeMap::new();
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ");
        captured.insert(name.as_str().to_string(), joined);
    }
    captured
}

/// First value per query-parameter name, or `None` when the query string is
/// absent or decodes to nothing.
fn url_params(uri: &Uri) -> Option<BTreeMap<String, String>> {
    let query = uri.query()?;
    let params = first_values(query.as_bytes());
    if params.is_empty() {
        None
    } else {
        Some(params)
    }
}

/// Decode a form-encoded body, keeping the first value per field.
fn decode_form(body: &[u8]) -> Option<BTreeMap<String, String>> {
    let fields = first_values(body);
    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}

/// Decode a JSON body. Parse failures are recoverable: the request proceeds
/// with no body field.
fn decode_json(sequence_number: u64, body: &[u8]) -> Option<serde_json::Value> {
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(
                sequence = sequence_number,
                %error,
                "Malformed JSON body, capturing record without it"
            );
            None
        }
    }
}

fn first_values(input: &[u8]) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    for (name, value) in form_urlencoded::parse(input) {
        values
            .entry(name.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn remote() -> SocketAddr {
        "203.0.113.9:43215".parse().unwrap()
    }

    #[test]
    fn classifier_matches_exactly() {
        assert_eq!(
            BodyKind::classify(Some("application/x-www-form-urlencoded")),
            BodyKind::Form
        );
        assert_eq!(BodyKind::classify(Some("application/json")), BodyKind::Json);
        assert_eq!(
            BodyKind::classify(Some("application/json; charset=utf-8")),
            BodyKind::Unsupported
        );
        assert_eq!(
            BodyKind::classify(Some("Application/JSON")),
            BodyKind::Unsupported
        );
        assert_eq!(BodyKind::classify(Some("text/plain")), BodyKind::Unsupported);
        assert_eq!(BodyKind::classify(None), BodyKind::Unsupported);
    }

    #[test]
    fn multi_valued_headers_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append("x-test", HeaderValue::from_static("a"));
        headers.append("x-test", HeaderValue::from_static("b"));
        headers.insert("accept", HeaderValue::from_static("*/*"));

        let record = normalize(
            1,
            &Method::GET,
            &Uri::from_static("/"),
            remote(),
            &headers,
            b"",
        );
        assert_eq!(record.headers["x-test"], "a, b");
        assert_eq!(record.headers["accept"], "*/*");
    }

    #[test]
    fn query_params_keep_first_value_only() {
        let record = normalize(
            1,
            &Method::GET,
            &Uri::from_static("/?k=1&k=2&other=x"),
            remote(),
            &HeaderMap::new(),
            b"",
        );
        let params = record.url_params.unwrap();
        assert_eq!(params["k"], "1");
        assert_eq!(params["other"], "x");
    }

    #[test]
    fn no_query_string_means_no_params() {
        let record = normalize(
            1,
            &Method::GET,
            &Uri::from_static("/"),
            remote(),
            &HeaderMap::new(),
            b"",
        );
        assert!(record.url_params.is_none());
    }

    #[test]
    fn form_body_keeps_first_value_only() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(FORM_CONTENT_TYPE),
        );

        let record = normalize(
            1,
            &Method::POST,
            &Uri::from_static("/"),
            remote(),
            &headers,
            b"a=1&a=2&b=3",
        );
        let form = record.form_data.unwrap();
        assert_eq!(form["a"], "1");
        assert_eq!(form["b"], "3");
        assert!(record.body.is_none());
    }

    #[test]
    fn empty_form_body_leaves_section_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(FORM_CONTENT_TYPE),
        );

        let record = normalize(
            1,
            &Method::POST,
            &Uri::from_static("/"),
            remote(),
            &headers,
            b"",
        );
        assert!(record.form_data.is_none());
    }

    #[test]
    fn json_body_is_decoded() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );

        let record = normalize(
            1,
            &Method::POST,
            &Uri::from_static("/"),
            remote(),
            &headers,
            br#"{"x":1}"#,
        );
        assert_eq!(record.body, Some(serde_json::json!({"x": 1})));
        assert!(record.form_data.is_none());
    }

    #[test]
    fn malformed_json_leaves_body_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );

        let record = normalize(
            1,
            &Method::POST,
            &Uri::from_static("/"),
            remote(),
            &headers,
            b"{x:}",
        );
        assert!(record.body.is_none());
        assert!(record.form_data.is_none());
    }

    #[test]
    fn unsupported_content_type_populates_neither_section() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let record = normalize(
            1,
            &Method::POST,
            &Uri::from_static("/"),
            remote(),
            &headers,
            b"a=1&b=2",
        );
        assert!(record.form_data.is_none());
        assert!(record.body.is_none());
    }

    #[test]
    fn transport_fields_are_verbatim() {
        let record = normalize(
            7,
            &Method::PUT,
            &Uri::from_static("/?q=1"),
            remote(),
            &HeaderMap::new(),
            b"",
        );
        assert_eq!(record.sequence_number, 7);
        assert_eq!(record.method, "PUT");
        assert_eq!(record.request_uri, "/?q=1");
        assert_eq!(record.remote_address, "203.0.113.9:43215");
        assert!(chrono::NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT).is_ok());
    }
}
