//! Canonical in-memory representation of one captured request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized view of one inbound HTTP request.
///
/// Built once per request by the normalizer, then handed by reference to the
/// presenter, the log sink, and the responder. Serialized field names are
/// camelCase; the optional sections are omitted entirely when unpopulated.
/// At most one of `form_data`/`body` is populated per record, since the
/// content-type dispatch is mutually exclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    /// Process-wide capture ordinal, starting at 1.
    pub sequence_number: u64,

    /// Capture time, `DD.MM.YY HH:MM:SS`.
    pub timestamp: String,

    pub method: String,

    /// Origin-form request URI, including the query string.
    #[serde(rename = "requestURI")]
    pub request_uri: String,

    /// Peer socket address as reported by the transport.
    pub remote_address: String,

    /// Header name to value; multi-valued headers joined with `", "`.
    pub headers: BTreeMap<String, String>,

    /// First value per query-parameter name; absent when there is no query
    /// string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_params: Option<BTreeMap<String, String>>,

    /// First value per form field; populated only for
    /// `application/x-www-form-urlencoded` payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_data: Option<BTreeMap<String, String>>,

    /// Decoded JSON payload; populated only for `application/json` payloads
    /// that parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_record() -> RequestRecord {
        RequestRecord {
            sequence_number: 1,
            timestamp: "29.08.26 12:00:00".to_string(),
            method: "GET".to_string(),
            request_uri: "/".to_string(),
            remote_address: "127.0.0.1:5000".to_string(),
            headers: BTreeMap::new(),
            url_params: None,
            form_data: None,
            body: None,
        }
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let json = serde_json::to_value(minimal_record()).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("sequenceNumber"));
        assert!(object.contains_key("requestURI"));
        assert!(object.contains_key("remoteAddress"));
        assert!(object.contains_key("headers"));
    }

    #[test]
    fn unpopulated_sections_are_omitted() {
        let json = serde_json::to_value(minimal_record()).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("urlParams"));
        assert!(!object.contains_key("formData"));
        assert!(!object.contains_key("body"));
    }

    #[test]
    fn json_round_trip_is_exact() {
        let mut record = minimal_record();
        record.body = Some(serde_json::json!({"x": 1, "nested": [null, true, "s"]}));
        let line = serde_json::to_string(&record).unwrap();
        let back: RequestRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back.sequence_number, record.sequence_number);
        assert_eq!(back.body, record.body);
        assert_eq!(back.form_data, None);
    }
}
