use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Output resolution requested from the background-removal service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeType {
    #[default]
    Reduced,
    Full,
}

impl SizeType {
    pub fn as_str(self) -> &'static str {
        match self {
            SizeType::Reduced => "reduced",
            SizeType::Full => "full",
        }
    }

    /// Signed-in users get full resolution by default; guests get the reduced preview.
    pub fn default_for(session: &Session) -> Self {
        if session.is_signed_in() {
            SizeType::Full
        } else {
            SizeType::Reduced
        }
    }
}

impl std::fmt::Display for SizeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AuthUser, UserRecord};

    #[test]
    fn query_value_matches_display() {
        assert_eq!(SizeType::Full.as_str(), "full");
        assert_eq!(SizeType::Reduced.to_string(), "reduced");
    }

    #[test]
    fn default_size_follows_session() {
        assert_eq!(SizeType::default_for(&Session::Guest), SizeType::Reduced);

        let user = AuthUser {
            token: Some("t".to_string()),
            record: UserRecord {
                username: "ada".to_string(),
                ..UserRecord::default()
            },
        };
        assert_eq!(
            SizeType::default_for(&Session::SignedIn(user)),
            SizeType::Full
        );
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&SizeType::Full).unwrap(),
            "\"full\""
        );
        let s: SizeType = serde_json::from_str("\"reduced\"").unwrap();
        assert_eq!(s, SizeType::Reduced);
    }
}
