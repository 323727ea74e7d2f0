//! # Twirp Errors
//!
//! Every non-2xx response is surfaced as a [`TwirpError`]. Twirp servers describe failures
//! with a JSON body of the form:
//!
//! ```json
//! {"code": "not_found", "msg": "unknown method", "meta": {"key": "value"}}
//! ```
//!
//! Responses that do not carry such a body (a load balancer answering `502`, a proxy
//! returning an HTML page...) are reported as an `internal` error that names the HTTP
//! status, so callers always receive the same structured shape.
use http::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Reason phrase used when a status code has no canonical one.
const UNKNOWN_STATUS: &str = "Unknown Status";

/// A structured error returned by a Twirp server or an intermediary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("twirp error {code}: {message}")]
pub struct TwirpError {
    /// Machine readable error code (e.g. `not_found`).
    pub code: String,
    /// Human readable description of the failure.
    pub message: String,
    /// Arbitrary string metadata attached by the server.
    pub meta: HashMap<String, String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    code: String,
    msg: String,
    #[serde(default)]
    meta: serde_json::Value,
}

/// Flattens the envelope's `meta` into strings. Non-string values keep their JSON text;
/// anything other than an object carries no metadata.
fn meta_to_strings(meta: serde_json::Value) -> HashMap<String, String> {
    let serde_json::Value::Object(entries) = meta else {
        return HashMap::new();
    };

    entries
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(text) => (key, text),
            other => (key, other.to_string()),
        })
        .collect()
}

impl TwirpError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            meta: HashMap::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Builds the error for a non-2xx response from its status and raw body.
    ///
    /// Falls back to [`TwirpError::from_intermediary`] when the body is not a valid
    /// Twirp error envelope.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) => Self {
                code: envelope.code,
                message: envelope.msg,
                meta: meta_to_strings(envelope.meta),
            },
            Err(err) => {
                tracing::warn!(
                    status = status.as_u16(),
                    error = %err,
                    "response body is not a twirp error envelope"
                );
                Self::from_intermediary(status)
            }
        }
    }

    /// The error reported when something other than a Twirp server answered.
    pub fn from_intermediary(status: StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or(UNKNOWN_STATUS);
        Self::new(
            ErrorCode::Internal.as_str(),
            format!(
                "Error from intermediary with HTTP status code {} {}",
                status.as_u16(),
                reason
            ),
        )
    }

    /// Returns the protocol error code, if the server used one of the standard codes.
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.code.parse().ok()
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }
}

/// The error codes defined by the Twirp protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Canceled,
    Unknown,
    InvalidArgument,
    Malformed,
    DeadlineExceeded,
    NotFound,
    BadRoute,
    AlreadyExists,
    PermissionDenied,
    Unauthenticated,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 18] = [
        ErrorCode::Canceled,
        ErrorCode::Unknown,
        ErrorCode::InvalidArgument,
        ErrorCode::Malformed,
        ErrorCode::DeadlineExceeded,
        ErrorCode::NotFound,
        ErrorCode::BadRoute,
        ErrorCode::AlreadyExists,
        ErrorCode::PermissionDenied,
        ErrorCode::Unauthenticated,
        ErrorCode::ResourceExhausted,
        ErrorCode::FailedPrecondition,
        ErrorCode::Aborted,
        ErrorCode::OutOfRange,
        ErrorCode::Unimplemented,
        ErrorCode::Internal,
        ErrorCode::Unavailable,
        ErrorCode::DataLoss,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Canceled => "canceled",
            ErrorCode::Unknown => "unknown",
            ErrorCode::InvalidArgument => "invalid_argument",
            ErrorCode::Malformed => "malformed",
            ErrorCode::DeadlineExceeded => "deadline_exceeded",
            ErrorCode::NotFound => "not_found",
            ErrorCode::BadRoute => "bad_route",
            ErrorCode::AlreadyExists => "already_exists",
            ErrorCode::PermissionDenied => "permission_denied",
            ErrorCode::Unauthenticated => "unauthenticated",
            ErrorCode::ResourceExhausted => "resource_exhausted",
            ErrorCode::FailedPrecondition => "failed_precondition",
            ErrorCode::Aborted => "aborted",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::Unimplemented => "unimplemented",
            ErrorCode::Internal => "internal",
            ErrorCode::Unavailable => "unavailable",
            ErrorCode::DataLoss => "data_loss",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown Twirp error code '{0}'")]
pub struct UnknownErrorCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownErrorCode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_envelope() {
        let body = br#"{"code":"not_found","msg":"unknown method","meta":{"retry":"no"}}"#;
        let err = TwirpError::from_response(StatusCode::NOT_FOUND, body);

        assert_eq!(err.code, "not_found");
        assert_eq!(err.message, "unknown method");
        assert_eq!(err.meta("retry"), Some("no"));
        assert_eq!(err.error_code(), Some(ErrorCode::NotFound));
    }

    #[test]
    fn missing_or_null_meta_is_empty() {
        let err = TwirpError::from_response(
            StatusCode::BAD_REQUEST,
            br#"{"code":"malformed","msg":"bad"}"#,
        );
        assert!(err.meta.is_empty());

        let err = TwirpError::from_response(
            StatusCode::BAD_REQUEST,
            br#"{"code":"malformed","msg":"bad","meta":null}"#,
        );
        assert!(err.meta.is_empty());
    }

    #[test]
    fn invalid_json_falls_back_to_intermediary() {
        let err = TwirpError::from_response(StatusCode::INTERNAL_SERVER_ERROR, b"not json");

        assert_eq!(err.code, "internal");
        assert_eq!(
            err.message,
            "Error from intermediary with HTTP status code 500 Internal Server Error"
        );
        assert!(err.meta.is_empty());
    }

    #[test]
    fn missing_required_fields_fall_back_to_intermediary() {
        let err = TwirpError::from_response(StatusCode::BAD_GATEWAY, br#"{"code":"unavailable"}"#);

        assert_eq!(err.code, "internal");
        assert_eq!(
            err.message,
            "Error from intermediary with HTTP status code 502 Bad Gateway"
        );
    }

    #[test]
    fn non_string_meta_keeps_code_and_message() {
        let err = TwirpError::from_response(
            StatusCode::NOT_FOUND,
            br#"{"code":"not_found","msg":"gone","meta":{"attempts":3,"retry":"no","ok":false}}"#,
        );

        assert_eq!(err.code, "not_found");
        assert_eq!(err.message, "gone");
        assert_eq!(err.meta("attempts"), Some("3"));
        assert_eq!(err.meta("retry"), Some("no"));
        assert_eq!(err.meta("ok"), Some("false"));
    }

    #[test]
    fn non_object_meta_is_empty() {
        let err = TwirpError::from_response(
            StatusCode::CONFLICT,
            br#"{"code":"aborted","msg":"retry later","meta":["a"]}"#,
        );

        assert_eq!(err.code, "aborted");
        assert!(err.meta.is_empty());
    }

    #[test]
    fn non_string_code_falls_back_to_intermediary() {
        let err = TwirpError::from_response(StatusCode::NOT_FOUND, br#"{"code":5,"msg":"gone"}"#);

        assert_eq!(err.code, "internal");
        assert_eq!(
            err.message,
            "Error from intermediary with HTTP status code 404 Not Found"
        );
    }

    #[test]
    fn status_without_reason_phrase() {
        let status = StatusCode::from_u16(599).unwrap();
        let err = TwirpError::from_intermediary(status);

        assert_eq!(
            err.message,
            "Error from intermediary with HTTP status code 599 Unknown Status"
        );
    }

    #[test]
    fn custom_codes_are_kept_verbatim() {
        let err = TwirpError::from_response(
            StatusCode::IM_A_TEAPOT,
            br#"{"code":"teapot","msg":"short and stout"}"#,
        );
        assert_eq!(err.code, "teapot");
        assert_eq!(err.error_code(), None);
    }

    #[test]
    fn error_codes_round_trip_through_strings() {
        for code in ErrorCode::ALL {
            assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(code));
        }
        assert!("nope".parse::<ErrorCode>().is_err());
    }
}
