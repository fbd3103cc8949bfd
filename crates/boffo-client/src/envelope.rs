//! # Response Envelope
//!
//! Every list and detail endpoint wraps its payload the same way:
//!
//! ```text
//! {
//!   "statusCode": "200",          optional, string or number
//!   "message":    "...",          optional; non-empty on a 2xx means failure
//!   "pagination": { ... },        list endpoints only
//!   "data":       [ ... ] | {..} | null
//! }
//! ```
//!
//! The envelope is decoded untyped first so the `message` rule applies even
//! when `data` does not match the record type the caller expects.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use boffo_core::{ListResult, Pagination};

use crate::error::RequestError;

/// A decoded, not yet typed, response envelope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(default, rename = "statusCode", alias = "status_code")]
    status_code: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    pagination: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
}

impl Envelope {
    /// Decodes a 2xx response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, RequestError> {
        serde_json::from_slice(body)
            .map_err(|e| RequestError::Unknown(format!("malformed envelope: {}", e)))
    }

    /// The status code, whichever way the backend spelled it.
    pub fn status_code(&self) -> Option<String> {
        match self.status_code.as_ref()? {
            Value::String(code) => Some(code.clone()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        }
    }

    /// The business message, if one was sent.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    /// Fails with `Api` when the server attached a message.
    pub fn check_message(&self) -> Result<(), RequestError> {
        match self.message() {
            Some(message) => Err(RequestError::Api {
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Unwraps a list response.
    ///
    /// `pagination` is required; absent or `null` `data` is an empty page.
    pub fn into_list<T: DeserializeOwned>(self) -> Result<ListResult<T>, RequestError> {
        self.check_message()?;

        let pagination = self
            .pagination
            .ok_or_else(|| RequestError::Unknown("envelope has no pagination".into()))?;
        let pagination: Pagination = serde_json::from_value(pagination)
            .map_err(|e| RequestError::Unknown(format!("malformed pagination: {}", e)))?;

        // An empty page may arrive as `"data": null`
        let items: Vec<T> = match self.data.filter(|d| !d.is_null()) {
            Some(data) => serde_json::from_value(data)
                .map_err(|e| RequestError::Unknown(format!("malformed records: {}", e)))?,
            None => Vec::new(),
        };

        Ok(ListResult::new(items, pagination))
    }

    /// Unwraps a single-record response.
    pub fn into_detail<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        self.check_message()?;

        let data = self
            .data
            .filter(|d| !d.is_null())
            .ok_or_else(|| RequestError::Unknown("envelope has no data".into()))?;

        serde_json::from_value(data)
            .map_err(|e| RequestError::Unknown(format!("malformed record: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Row {
        id: u32,
    }

    fn envelope(value: Value) -> Envelope {
        Envelope::from_slice(value.to_string().as_bytes()).unwrap()
    }

    fn pagination() -> Value {
        json!({
            "page": 1, "page_size": 10, "total": 2, "total_pages": 1,
            "has_next": false, "has_previous": false, "next_page": 1, "previous_page": 1
        })
    }

    #[test]
    fn test_list_envelope() {
        let result: ListResult<Row> = envelope(json!({
            "statusCode": "200",
            "pagination": pagination(),
            "data": [{ "id": 1 }, { "id": 2 }]
        }))
        .into_list()
        .unwrap();

        assert_eq!(result.items, vec![Row { id: 1 }, Row { id: 2 }]);
        assert_eq!(result.pagination.total, 2);
    }

    #[test]
    fn test_message_on_success_is_api_error() {
        // data does not even match Row; the message still wins
        let err = envelope(json!({
            "message": "not allowed",
            "data": "oops"
        }))
        .into_list::<Row>()
        .unwrap_err();

        assert_eq!(
            err,
            RequestError::Api {
                message: "not allowed".into()
            }
        );
    }

    #[test]
    fn test_empty_message_is_ignored() {
        let result: ListResult<Row> = envelope(json!({
            "message": "",
            "pagination": pagination(),
            "data": []
        }))
        .into_list()
        .unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_null_data_is_an_empty_page() {
        let result: ListResult<Row> = envelope(json!({
            "pagination": pagination(),
            "data": null
        }))
        .into_list()
        .unwrap();

        assert!(result.is_empty());
        assert_eq!(result.pagination.total, 2);

        let result: ListResult<Row> = envelope(json!({ "pagination": pagination() }))
            .into_list()
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_parts_are_unknown() {
        let err = envelope(json!({ "data": [] })).into_list::<Row>().unwrap_err();
        assert!(matches!(err, RequestError::Unknown(_)));

        let err = envelope(json!({ "pagination": pagination(), "data": { "id": 1 } }))
            .into_list::<Row>()
            .unwrap_err();
        assert!(matches!(err, RequestError::Unknown(_)));

        let err = envelope(json!({ "data": null })).into_detail::<Row>().unwrap_err();
        assert!(matches!(err, RequestError::Unknown(_)));

        assert!(matches!(
            Envelope::from_slice(b"not json"),
            Err(RequestError::Unknown(_))
        ));
    }

    #[test]
    fn test_status_code_spellings() {
        assert_eq!(envelope(json!({ "statusCode": "200" })).status_code(), Some("200".into()));
        assert_eq!(envelope(json!({ "status_code": 200 })).status_code(), Some("200".into()));
        assert_eq!(envelope(json!({})).status_code(), None);
    }

    #[test]
    fn test_detail_envelope() {
        let row: Row = envelope(json!({ "data": { "id": 7 } })).into_detail().unwrap();
        assert_eq!(row, Row { id: 7 });
    }
}
