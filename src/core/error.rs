use thiserror::Error;

/// Failures talking to the background-removal service or the auth backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error! Status: {status}")]
    Status { status: u16 },

    /// The service answered but reported an `error` field.
    #[error("{0}")]
    Server(String),

    /// The auth backend rejected the request; the message is user-facing.
    #[error("{0}")]
    Auth(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid image data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("{0}")]
    Network(String),

    /// The form failed local validation; nothing was sent.
    #[error(transparent)]
    Form(#[from] FormError),
}

impl ApiError {
    /// Text for the alert dialog shown when an image request fails.
    ///
    /// `subject` names what was being processed ("the image", "the images").
    pub fn alert_text(&self, subject: &str) -> String {
        match self {
            ApiError::Server(msg) => format!("Error: {msg}"),
            other => format!("An error occurred while processing {subject}: {other}"),
        }
    }

    /// Inline text under the login/register forms.
    ///
    /// Rejections from the auth backend are shown verbatim; transport and
    /// decoding problems collapse into one generic message.
    pub fn form_text(&self) -> String {
        match self {
            ApiError::Auth(msg) => msg.clone(),
            ApiError::Form(e) => e.to_string(),
            _ => crate::api::NETWORK_FORM_ERROR.to_string(),
        }
    }
}

/// Local form validation failures, shown inline without contacting the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
}
