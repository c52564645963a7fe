//! Blocking REST client for the workspace secrets ACL endpoints.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::api::SecretsApi;
use crate::config::ClientConfig;
use crate::constants::{DELETE_ACL_PATH, GET_ACL_PATH, PUT_ACL_PATH};
use crate::error::{ApiError, Result};
use crate::types::{AclItem, ApiErrorBody, DeleteAcl, GetAclRequest, PutAcl};

pub struct WorkspaceClient {
    http: Client,
    config: ClientConfig,
}

impl WorkspaceClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("secret-acl-core/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn execute(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        let response = request.bearer_auth(&self.config.token).send()?;
        let status = response.status();
        tracing::debug!(target = "secret_acl::http", path, status = status.as_u16());
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(decode_error(status, &body).into())
    }

    fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T> {
        Ok(self.execute(request, path)?.json()?)
    }
}

impl SecretsApi for WorkspaceClient {
    fn put_acl(&self, request: &PutAcl) -> Result<()> {
        let builder = self
            .http
            .post(self.config.api_url(PUT_ACL_PATH))
            .json(request);
        self.execute(builder, PUT_ACL_PATH).map(drop)
    }

    fn get_acl(&self, request: &GetAclRequest) -> Result<AclItem> {
        let builder = self
            .http
            .get(self.config.api_url(GET_ACL_PATH))
            .query(request);
        self.execute_json(builder, GET_ACL_PATH)
    }

    fn delete_acl(&self, request: &DeleteAcl) -> Result<()> {
        let builder = self
            .http
            .post(self.config.api_url(DELETE_ACL_PATH))
            .json(request);
        self.execute(builder, DELETE_ACL_PATH).map(drop)
    }
}

/// Turns a non-2xx response into an [`ApiError`].
///
/// The service answers with `{"error_code": ..., "message": ...}`; anything
/// else keeps the raw body (or the status reason) as the message. A bare 404
/// never becomes a missing-resource classification: proxies answer 404 too.
pub(crate) fn decode_error(status: StatusCode, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .filter(|b| !b.error_code.is_empty() || !b.message.is_empty());
    let (error_code, message) = match parsed {
        Some(b) => (b.error_code, b.message),
        None => {
            let fallback = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.trim().to_string()
            };
            (String::new(), fallback)
        }
    };
    let error_code = if error_code.is_empty() {
        status_error_code(status).to_string()
    } else {
        error_code
    };
    ApiError::new(error_code, message).with_status(status.as_u16())
}

fn status_error_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "INVALID_REQUEST",
        StatusCode::UNAUTHORIZED => "UNAUTHENTICATED",
        StatusCode::FORBIDDEN => "PERMISSION_DENIED",
        StatusCode::TOO_MANY_REQUESTS => "REQUEST_LIMIT_EXCEEDED",
        s if s.is_server_error() => "INTERNAL_ERROR",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_error_body() {
        let err = decode_error(
            StatusCode::BAD_REQUEST,
            r#"{"error_code":"INVALID_REQUEST","message":"Internal error happened"}"#,
        );
        assert_eq!(err.error_code, "INVALID_REQUEST");
        assert_eq!(err.to_string(), "Internal error happened");
        assert_eq!(err.status_code, Some(400));
        assert!(!err.is_missing());
    }

    #[test]
    fn not_found_body_is_missing() {
        let err = decode_error(
            StatusCode::NOT_FOUND,
            r#"{"error_code":"RESOURCE_DOES_NOT_EXIST","message":"Item not found"}"#,
        );
        assert!(err.is_missing());
    }

    #[test]
    fn non_json_body_falls_back_to_text_and_status() {
        let err = decode_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.error_code, "INTERNAL_ERROR");
        assert_eq!(err.message, "<html>bad gateway</html>");

        let err = decode_error(StatusCode::NOT_FOUND, "");
        assert_eq!(err.message, "Not Found");
        assert!(!err.is_missing());

        let err = decode_error(StatusCode::FORBIDDEN, "");
        assert_eq!(err.error_code, "PERMISSION_DENIED");
        assert_eq!(err.message, "Forbidden");
    }

    #[test]
    fn client_requires_valid_config() {
        assert!(WorkspaceClient::new(ClientConfig::new("example.com", "t")).is_err());
        let client = WorkspaceClient::new(ClientConfig::new("https://example.com", "t")).unwrap();
        assert_eq!(client.config().host, "https://example.com");
    }
}
