use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::ApiError;

/// `{success, data?, message?}` wrapper shared by every endpoint. The payload
/// stays untyped until `success` and the status have been checked, so a
/// failure reply carries its message whatever shape `data` has.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    /// Only `POST /admin/users` reports this, beside the envelope.
    #[serde(default)]
    pub users_created: Option<Value>,
}

fn logical(message: Option<String>, status: StatusCode) -> ApiError {
    ApiError::Logical(message.unwrap_or_else(|| format!("HTTP {}", status.as_u16())))
}

fn malformed(e: impl std::fmt::Display) -> ApiError {
    ApiError::Transport(format!("malformed response: {}", e))
}

/// Parses the wrapper and turns `success: false` or a non-2xx status into a
/// logical failure.
fn accept(status: StatusCode, body: &str) -> Result<Envelope, ApiError> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => return Err(malformed(e)),
        Err(_) => return Err(logical(None, status)),
    };
    if !envelope.success || !status.is_success() {
        return Err(logical(envelope.message, status));
    }
    Ok(envelope)
}

fn typed<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(malformed)
}

/// Decodes an envelope whose `data` is required on success.
pub fn decode_data<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    let data = accept(status, body)?
        .data
        .ok_or_else(|| malformed("missing data"))?;
    typed(data)
}

/// Decodes an envelope where only the success flag matters.
pub fn decode_ack(status: StatusCode, body: &str) -> Result<(), ApiError> {
    accept(status, body).map(|_| ())
}

pub fn decode_users_created(status: StatusCode, body: &str) -> Result<u32, ApiError> {
    match accept(status, body)?.users_created {
        Some(count) => typed(count),
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Car, Stats};

    #[test]
    fn test_logical_failure_carries_message() {
        let err = decode_data::<Stats>(StatusCode::OK, r#"{"success":false,"message":"boom"}"#).unwrap_err();
        assert_eq!(err, ApiError::Logical("boom".to_string()));
    }

    #[test]
    fn test_non_2xx_is_logical() {
        let err = decode_ack(StatusCode::NOT_FOUND, r#"{"success":true}"#).unwrap_err();
        assert_eq!(err, ApiError::Logical("HTTP 404".to_string()));

        let err = decode_ack(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").unwrap_err();
        assert_eq!(err, ApiError::Logical("HTTP 500".to_string()));
    }

    #[test]
    fn test_malformed_body_is_transport() {
        let err = decode_ack(StatusCode::OK, "not json").unwrap_err();
        assert!(err.is_transport());

        let err = decode_data::<Stats>(StatusCode::OK, r#"{"success":true}"#).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_users_created() {
        let n = decode_users_created(StatusCode::OK, r#"{"success":true,"users_created":3}"#).unwrap();
        assert_eq!(n, 3);
    }

    #[test]
    fn test_failure_message_survives_unexpected_data() {
        let body = r#"{"success":false,"data":{},"message":"Invalid year filter"}"#;
        let err = decode_data::<Vec<Car>>(StatusCode::OK, body).unwrap_err();
        assert_eq!(err, ApiError::Logical("Invalid year filter".to_string()));

        let body = r#"{"success":false,"message":"Bad filter","data":"x"}"#;
        let err = decode_data::<Vec<Car>>(StatusCode::BAD_REQUEST, body).unwrap_err();
        assert_eq!(err, ApiError::Logical("Bad filter".to_string()));
    }

    #[test]
    fn test_wrong_data_shape_on_success_is_transport() {
        let err = decode_data::<Vec<Car>>(StatusCode::OK, r#"{"success":true,"data":{}}"#).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_users_created_failure_keeps_message() {
        let body = r#"{"success":false,"users_created":"none","message":"Duplicate user"}"#;
        let err = decode_users_created(StatusCode::OK, body).unwrap_err();
        assert_eq!(err, ApiError::Logical("Duplicate user".to_string()));

        assert_eq!(decode_users_created(StatusCode::OK, r#"{"success":true}"#).unwrap(), 0);
    }
}
