//! Wire contract of the two remote services.
//!
//! Image endpoints are served by the background-removal API on the page's own
//! origin. Login and registration go to a PocketBase-style auth backend.
//!
//! The `parse_*` functions take the HTTP status and the raw body text so the
//! browser glue only has to hand over what `fetch` produced.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::image::{BatchOutcome, ProcessedImage};
use crate::size::SizeType;

pub const FALLBACK_LOGIN_ERROR: &str = "Login failed. Please check your credentials.";
pub const FALLBACK_REGISTER_ERROR: &str = "Registration failed. Please try again.";
pub const NETWORK_FORM_ERROR: &str = "An error occurred. Please try again.";

/// What one POST produced: HTTP status and body text, or a transport failure.
pub type Reply<'a> = Result<(u16, &'a str), ApiError>;

/// Reply of `POST /api/remove-bg`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoveBgResponse {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub size_type: Option<SizeType>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One entry of the `results` array of `POST /api/batch-process`.
///
/// Untagged: an entry with `image` is a success, anything else with `error`
/// is a per-file failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BatchItem {
    Processed {
        original_name: String,
        image: String,
        #[serde(default)]
        size_type: Option<SizeType>,
        #[serde(default)]
        width: Option<u32>,
        #[serde(default)]
        height: Option<u32>,
    },
    Failed {
        original_name: String,
        error: String,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub results: Vec<BatchItem>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateTokenRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidateTokenResponse {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Auth payload as returned by `auth-with-password` and echoed by `validate-token`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(default)]
    pub token: Option<String>,
    pub record: UserRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub identity: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

pub fn parse_remove_bg(
    status: u16,
    body: &str,
    requested: SizeType,
) -> Result<ProcessedImage, ApiError> {
    if !is_success(status) {
        return Err(ApiError::Status { status });
    }
    let resp: RemoveBgResponse = serde_json::from_str(body)?;
    if let Some(err) = resp.error {
        return Err(ApiError::Server(err));
    }
    let Some(image) = resp.image else {
        return Err(ApiError::Server("No image in response".to_string()));
    };
    let size_type = resp.size_type.unwrap_or_else(|| {
        tracing::debug!("remove-bg reply without size_type; assuming {requested}");
        requested
    });
    Ok(ProcessedImage {
        base64: image,
        size_type,
        width: resp.width,
        height: resp.height,
    })
}

pub fn parse_batch(
    status: u16,
    body: &str,
    requested: SizeType,
) -> Result<Vec<BatchOutcome>, ApiError> {
    if !is_success(status) {
        return Err(ApiError::Status { status });
    }
    let resp: BatchResponse = serde_json::from_str(body)?;
    if let Some(err) = resp.error {
        return Err(ApiError::Server(err));
    }
    Ok(resp
        .results
        .into_iter()
        .map(|item| match item {
            BatchItem::Processed {
                original_name,
                image,
                size_type,
                width,
                height,
            } => BatchOutcome::Processed {
                original_name,
                image: ProcessedImage {
                    base64: image,
                    size_type: size_type.unwrap_or(requested),
                    width,
                    height,
                },
            },
            BatchItem::Failed {
                original_name,
                error,
            } => BatchOutcome::Failed {
                original_name,
                error,
            },
        })
        .collect())
}

/// Returns the signed-in user when the token is still valid.
///
/// Any malformed reply counts as "not valid"; the caller drops the token.
pub fn parse_validate_token(status: u16, body: &str) -> Option<AuthUser> {
    if !is_success(status) {
        return None;
    }
    match serde_json::from_str::<ValidateTokenResponse>(body) {
        Ok(ValidateTokenResponse {
            valid: true,
            user: Some(user),
        }) => Some(user),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("validate-token reply did not parse: {e}");
            None
        }
    }
}

/// Parses an `auth-with-password` reply. The returned user always carries the token.
pub fn parse_login(status: u16, body: &str) -> Result<AuthUser, ApiError> {
    if !is_success(status) {
        return Err(auth_error(body, FALLBACK_LOGIN_ERROR));
    }
    let user: AuthUser = serde_json::from_str(body)?;
    match user.token.as_deref() {
        Some(t) if !t.is_empty() => Ok(user),
        _ => Err(ApiError::Auth(FALLBACK_LOGIN_ERROR.to_string())),
    }
}

/// Registration replies only matter for their status and error message.
pub fn parse_register(status: u16, body: &str) -> Result<(), ApiError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(auth_error(body, FALLBACK_REGISTER_ERROR))
    }
}

fn auth_error(body: &str, fallback: &str) -> ApiError {
    let message = serde_json::from_str::<AuthErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    ApiError::Auth(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn remove_bg_success_keeps_dimensions() {
        let body = json!({
            "image": "iVBORw0KGgo=",
            "size_type": "full",
            "width": 1024,
            "height": 768
        })
        .to_string();
        let img = parse_remove_bg(200, &body, SizeType::Reduced).unwrap();
        assert_eq!(img.size_type, SizeType::Full);
        assert_eq!(img.width, Some(1024));
        assert_eq!(img.height, Some(768));
        assert_eq!(img.base64, "iVBORw0KGgo=");
    }

    #[test]
    fn remove_bg_without_size_type_uses_requested() {
        let body = json!({ "image": "AAAA" }).to_string();
        let img = parse_remove_bg(200, &body, SizeType::Reduced).unwrap();
        assert_eq!(img.size_type, SizeType::Reduced);
        assert_eq!(img.width, None);
    }

    #[test]
    fn remove_bg_error_field_is_server_error() {
        let body = json!({ "error": "No image provided" }).to_string();
        let err = parse_remove_bg(200, &body, SizeType::Full).unwrap_err();
        assert!(matches!(err, ApiError::Server(ref m) if m == "No image provided"));
    }

    #[test]
    fn remove_bg_http_failure_ignores_body() {
        let body = json!({ "error": "boom" }).to_string();
        let err = parse_remove_bg(500, &body, SizeType::Full).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500 }));
    }

    #[test]
    fn remove_bg_garbage_body_is_decode_error() {
        let err = parse_remove_bg(200, "<html>", SizeType::Full).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn batch_mixes_successes_and_failures_in_order() {
        let body = json!({
            "results": [
                { "original_name": "a.png", "image": "AAAA", "size_type": "reduced", "width": 10, "height": 20 },
                { "original_name": "b.jpg", "error": "cannot identify image file" },
                { "original_name": "c.webp", "image": "BBBB" }
            ]
        })
        .to_string();
        let out = parse_batch(200, &body, SizeType::Full).unwrap();
        assert_eq!(out.len(), 3);
        assert!(matches!(&out[0], BatchOutcome::Processed { original_name, image }
            if original_name == "a.png" && image.size_type == SizeType::Reduced));
        assert!(matches!(&out[1], BatchOutcome::Failed { error, .. }
            if error == "cannot identify image file"));
        assert!(matches!(&out[2], BatchOutcome::Processed { image, .. }
            if image.size_type == SizeType::Full));
    }

    #[test]
    fn batch_top_level_error_is_server_error() {
        let body = json!({ "error": "No images provided" }).to_string();
        assert!(matches!(
            parse_batch(200, &body, SizeType::Reduced),
            Err(ApiError::Server(_))
        ));
    }

    #[test]
    fn validate_token_requires_valid_and_user() {
        let ok = json!({
            "valid": true,
            "user": { "token": "tok", "record": { "id": "u1", "username": "ada", "email": "a@x.io" } }
        })
        .to_string();
        let user = parse_validate_token(200, &ok).unwrap();
        assert_eq!(user.record.username, "ada");

        let invalid = json!({ "valid": false }).to_string();
        assert!(parse_validate_token(200, &invalid).is_none());
        assert!(parse_validate_token(200, "not json").is_none());
        assert!(parse_validate_token(401, &ok).is_none());
    }

    #[test]
    fn login_uses_server_message_or_fallback() {
        let rejected = json!({ "message": "Failed to authenticate." }).to_string();
        let err = parse_login(400, &rejected).unwrap_err();
        assert_eq!(err.to_string(), "Failed to authenticate.");

        let err = parse_login(400, "").unwrap_err();
        assert_eq!(err.to_string(), FALLBACK_LOGIN_ERROR);
    }

    #[test]
    fn login_success_needs_a_token() {
        let ok = json!({ "token": "abc", "record": { "username": "ada" } }).to_string();
        let user = parse_login(200, &ok).unwrap();
        assert_eq!(user.token.as_deref(), Some("abc"));

        let no_token = json!({ "record": { "username": "ada" } }).to_string();
        assert!(matches!(parse_login(200, &no_token), Err(ApiError::Auth(_))));
    }

    #[test]
    fn register_failure_falls_back_to_generic_text() {
        assert!(parse_register(200, "{}").is_ok());
        let err = parse_register(400, json!({ "message": "  " }).to_string().as_str()).unwrap_err();
        assert_eq!(err.to_string(), FALLBACK_REGISTER_ERROR);
    }

    #[test]
    fn register_request_uses_camel_case_confirm() {
        let req = RegisterRequest {
            username: "ada",
            email: "a@x.io",
            password: "pw",
            password_confirm: "pw",
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["passwordConfirm"], "pw");
        assert!(v.get("password_confirm").is_none());
    }
}
