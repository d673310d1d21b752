//! Request sequencing behind the login and register forms.
//!
//! A flow never touches the network. It hands out the next POST to send and
//! folds each reply into the following step, so the page drives it with
//! `fetch` and tests drive it with canned replies.

use serde::Serialize;

use crate::api::{self, AuthUser, Reply};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::forms::{LoginForm, RegisterForm};

/// A JSON POST the caller must send next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub url: String,
    pub body: String,
}

#[derive(Debug)]
pub enum AuthStep {
    /// Send `post`, then hand its reply to `then.advance`.
    Send { post: Post, then: AuthFlow },
    Done(Result<AuthUser, ApiError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Register,
    Login,
}

/// Login, or register followed by an automatic login with the same credentials.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    stage: Stage,
    login_url: String,
    credentials: LoginForm,
}

impl AuthFlow {
    pub fn login(cfg: &AppConfig, form: LoginForm) -> AuthStep {
        Self {
            stage: Stage::Login,
            login_url: cfg.login_url(),
            credentials: form,
        }
        .send_login()
    }

    /// A form that fails validation finishes at once without any request.
    pub fn register(cfg: &AppConfig, form: &RegisterForm) -> AuthStep {
        let body = match form.request() {
            Ok(req) => to_body(&req),
            Err(e) => return AuthStep::Done(Err(e.into())),
        };
        let flow = Self {
            stage: Stage::Register,
            login_url: cfg.login_url(),
            credentials: form.login(),
        };
        flow.send(cfg.register_url(), body)
    }

    pub fn advance(self, reply: Reply<'_>) -> AuthStep {
        let (status, body) = match reply {
            Ok(r) => r,
            Err(e) => return AuthStep::Done(Err(e)),
        };
        match self.stage {
            Stage::Register => match api::parse_register(status, body) {
                Ok(()) => {
                    tracing::debug!("account created, logging in");
                    Self {
                        stage: Stage::Login,
                        ..self
                    }
                    .send_login()
                }
                Err(e) => AuthStep::Done(Err(e)),
            },
            Stage::Login => AuthStep::Done(api::parse_login(status, body)),
        }
    }

    fn send_login(self) -> AuthStep {
        let body = match self.credentials.request() {
            Ok(req) => to_body(&req),
            Err(e) => return AuthStep::Done(Err(e.into())),
        };
        let url = self.login_url.clone();
        self.send(url, body)
    }

    fn send(self, url: String, body: Result<String, ApiError>) -> AuthStep {
        match body {
            Ok(body) => AuthStep::Send {
                post: Post { url, body },
                then: self,
            },
            Err(e) => AuthStep::Done(Err(e)),
        }
    }
}

fn to_body<T: Serialize>(req: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string(req)?)
}
