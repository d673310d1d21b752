use crate::api::{self, AuthUser, Reply};

/// Who is using the page right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Guest,
    SignedIn(AuthUser),
}

/// Which set of download controls the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadTier {
    /// Reduced download plus a full-size button that asks for a login.
    Guest,
    /// Full-resolution downloads.
    Member,
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Session::SignedIn(_))
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Session::SignedIn(u) => Some(u),
            Session::Guest => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user().map(|u| u.record.username.as_str())
    }

    pub fn tier(&self) -> DownloadTier {
        if self.is_signed_in() {
            DownloadTier::Member
        } else {
            DownloadTier::Guest
        }
    }

    /// The "free account" banner is only for guests.
    pub fn shows_free_account_info(&self) -> bool {
        !self.is_signed_in()
    }
}

/// A stored token worth validating. Empty or blank values count as no token.
pub fn usable_token(stored: Option<String>) -> Option<String> {
    stored.filter(|t| !t.trim().is_empty())
}

/// Session state after validating the stored token at page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub session: Session,
    /// The token was rejected or could not be checked and must be forgotten.
    pub drop_token: bool,
}

/// Folds the `validate-token` reply into a session. Any failure, including a
/// transport error, leaves a guest and drops the token.
pub fn restore(token: &str, reply: Reply<'_>) -> Restored {
    let user = match reply {
        Ok((status, body)) => api::parse_validate_token(status, body),
        Err(e) => {
            tracing::warn!("auth check failed: {e}");
            None
        }
    };
    match user {
        Some(mut user) => {
            user.token.get_or_insert_with(|| token.to_string());
            Restored {
                session: Session::SignedIn(user),
                drop_token: false,
            }
        }
        None => Restored {
            session: Session::Guest,
            drop_token: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserRecord;
    use crate::ApiError;
    use serde_json::json;

    fn member() -> Session {
        Session::SignedIn(AuthUser {
            token: Some("tok".to_string()),
            record: UserRecord {
                id: "u1".to_string(),
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
            },
        })
    }

    #[test]
    fn guest_tier() {
        let s = Session::default();
        assert!(!s.is_signed_in());
        assert_eq!(s.tier(), DownloadTier::Guest);
        assert!(s.shows_free_account_info());
        assert_eq!(s.username(), None);
    }

    #[test]
    fn member_tier() {
        let s = member();
        assert_eq!(s.tier(), DownloadTier::Member);
        assert!(!s.shows_free_account_info());
        assert_eq!(s.username(), Some("ada"));
    }

    #[test]
    fn blank_tokens_are_not_checked() {
        assert_eq!(usable_token(None), None);
        assert_eq!(usable_token(Some(String::new())), None);
        assert_eq!(usable_token(Some("  ".to_string())), None);
        assert_eq!(usable_token(Some("tok".to_string())).as_deref(), Some("tok"));
    }

    #[test]
    fn valid_token_signs_in_and_keeps_it() {
        let body = json!({
            "valid": true,
            "user": { "record": { "id": "u1", "username": "ada" } }
        })
        .to_string();
        let r = restore("tok", Ok((200, body.as_str())));
        assert!(!r.drop_token);
        assert_eq!(r.session.username(), Some("ada"));
        assert_eq!(
            r.session.user().and_then(|u| u.token.as_deref()),
            Some("tok")
        );
    }

    #[test]
    fn rejected_token_is_dropped() {
        let body = json!({ "valid": false }).to_string();
        let r = restore("tok", Ok((200, body.as_str())));
        assert_eq!(r.session, Session::Guest);
        assert!(r.drop_token);

        let r = restore("tok", Ok((401, "{}")));
        assert_eq!(r.session, Session::Guest);
        assert!(r.drop_token);
    }

    #[test]
    fn transport_failure_also_drops_the_token() {
        let r = restore("tok", Err(ApiError::Network("fetch: offline".to_string())));
        assert_eq!(r.session, Session::Guest);
        assert!(r.drop_token);
    }
}
