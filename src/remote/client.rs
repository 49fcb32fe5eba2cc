//! Registration backend client
//!
//! Two JSON-over-POST endpoints:
//! - `{base}/validate-username`: `{username}` -> `{available}`
//! - `{base}/submit-form`: flat field map -> `{message, user}` or
//!   `{message?, errors?: [{msg}]}`

use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Flat map of field wire names to submitted values
pub type SubmissionPayload = BTreeMap<String, String>;

/// Fallback when a refusal carries no message
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Interpreted response of the submit endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResponse {
    /// 2xx: the user was registered
    Accepted {
        message: String,
        user: serde_json::Value,
    },
    /// Non-2xx with a readable body
    Refused { status: u16, message: String },
}

/// Body of a refused submission
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RefusalBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<ErrorDetail>>,
}

/// One structured validation error from the server
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorDetail {
    pub msg: String,
}

impl RefusalBody {
    /// First structured error, then the top-level message, then a fallback
    pub fn display_message(&self) -> String {
        self.errors
            .as_ref()
            .and_then(|errors| errors.first())
            .map(|detail| detail.msg.clone())
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct AcceptedBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    user: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct AvailabilityBody {
    available: bool,
}

/// Interpret a `validate-username` response
///
/// Anything but a 2xx `{available: bool}` carries no information.
pub fn interpret_availability(status: u16, body: &[u8]) -> Result<bool, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status(status));
    }
    serde_json::from_slice::<AvailabilityBody>(body)
        .map(|b| b.available)
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Interpret a `submit-form` response
pub fn interpret_submission(status: u16, body: &[u8]) -> Result<SubmitResponse, ApiError> {
    if (200..300).contains(&status) {
        let accepted: AcceptedBody =
            serde_json::from_slice(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        return Ok(SubmitResponse::Accepted {
            message: accepted.message,
            user: accepted.user,
        });
    }

    let refusal: RefusalBody =
        serde_json::from_slice(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok(SubmitResponse::Refused {
        status,
        message: refusal.display_message(),
    })
}

/// The backend operations the form depends on
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Ask whether a username is still free
    async fn check_username(&self, username: &str) -> Result<bool, ApiError>;

    /// Submit the registration
    async fn submit_form(&self, payload: &SubmissionPayload) -> Result<SubmitResponse, ApiError>;
}

/// `reqwest`-backed registration API
pub struct HttpRegistrationApi {
    client: Client,
    base_url: String,
    check_timeout: Duration,
    submit_timeout: Duration,
}

impl HttpRegistrationApi {
    /// Create a new client for `base_url` (e.g. `http://localhost:3000/api`)
    pub fn new(
        base_url: impl Into<String>,
        check_timeout: Duration,
        submit_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            check_timeout,
            submit_timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<(u16, Vec<u8>), ApiError> {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_reqwest)?;
        Ok((status, bytes.to_vec()))
    }
}

fn map_reqwest(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Http(e)
    }
}

#[async_trait]
impl RegistrationApi for HttpRegistrationApi {
    async fn check_username(&self, username: &str) -> Result<bool, ApiError> {
        let body = serde_json::json!({ "username": username });
        let (status, bytes) = self.post("validate-username", &body, self.check_timeout).await?;
        interpret_availability(status, &bytes)
    }

    async fn submit_form(&self, payload: &SubmissionPayload) -> Result<SubmitResponse, ApiError> {
        let (status, bytes) = self.post("submit-form", payload, self.submit_timeout).await?;
        interpret_submission(status, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability() {
        assert!(interpret_availability(200, br#"{"available":true}"#).unwrap());
        assert!(!interpret_availability(200, br#"{"available":false}"#).unwrap());
        assert!(matches!(
            interpret_availability(503, br#"{"available":false}"#),
            Err(ApiError::Status(503))
        ));
        assert!(matches!(
            interpret_availability(200, b"<html>"),
            Err(ApiError::Parse(_))
        ));
    }

    #[test]
    fn test_accepted_submission() {
        let body = br#"{"message":"Welcome, ada!","user":{"id":7,"username":"ada"}}"#;
        match interpret_submission(201, body).unwrap() {
            SubmitResponse::Accepted { message, user } => {
                assert_eq!(message, "Welcome, ada!");
                assert_eq!(user["id"], 7);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_refusal_message_precedence() {
        let body = br#"{"message":"Validation failed","errors":[{"msg":"Email already registered"},{"msg":"second"}]}"#;
        assert_eq!(
            interpret_submission(400, body).unwrap(),
            SubmitResponse::Refused {
                status: 400,
                message: "Email already registered".to_string()
            }
        );

        let body = br#"{"message":"Too many requests"}"#;
        assert_eq!(
            interpret_submission(429, body).unwrap(),
            SubmitResponse::Refused {
                status: 429,
                message: "Too many requests".to_string()
            }
        );

        let body = br#"{"errors":[]}"#;
        assert_eq!(
            interpret_submission(422, body).unwrap(),
            SubmitResponse::Refused {
                status: 422,
                message: UNKNOWN_ERROR_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_unreadable_refusal_is_parse_error() {
        assert!(matches!(
            interpret_submission(500, b"Internal Server Error"),
            Err(ApiError::Parse(_))
        ));
    }

    #[test]
    fn test_endpoint_joining() {
        let api = HttpRegistrationApi::new(
            "http://localhost:3000/api/",
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(api.endpoint("submit-form"), "http://localhost:3000/api/submit-form");
    }
}
