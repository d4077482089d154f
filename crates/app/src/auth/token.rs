//! Bearer token claims.

use serde::{Deserialize, Serialize};

use crate::auth::UserId;

/// The `userId` claim as issued: either a string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimedUserId {
    Number(i64),
    Text(String),
}

impl ClaimedUserId {
    /// Normalize into a [`UserId`]; blank strings carry no identity.
    #[must_use]
    pub fn into_user_id(self) -> Option<UserId> {
        match self {
            Self::Number(id) => Some(UserId::from(id)),
            Self::Text(id) if id.trim().is_empty() => None,
            Self::Text(id) => Some(UserId::from(id)),
        }
    }
}

impl From<&UserId> for ClaimedUserId {
    fn from(user: &UserId) -> Self {
        user.as_str()
            .parse::<i64>()
            .map_or_else(|_| Self::Text(user.to_string()), Self::Number)
    }
}

/// JWT payload shared with the user service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: ClaimedUserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn numeric_user_id_is_stringified() -> TestResult {
        let claims: Claims = serde_json::from_str(r#"{"userId": 42}"#)?;

        assert_eq!(claims.user_id.into_user_id(), Some(UserId::new("42")));

        Ok(())
    }

    #[test]
    fn string_user_id_is_kept() -> TestResult {
        let claims: Claims = serde_json::from_str(r#"{"userId": "u-7", "exp": 10}"#)?;

        assert_eq!(claims.exp, Some(10));
        assert_eq!(claims.user_id.into_user_id(), Some(UserId::new("u-7")));

        Ok(())
    }

    #[test]
    fn blank_user_id_has_no_identity() {
        assert_eq!(ClaimedUserId::Text("  ".to_string()).into_user_id(), None);
    }

    #[test]
    fn numeric_identity_is_issued_as_number() {
        assert_eq!(
            ClaimedUserId::from(&UserId::new("12")),
            ClaimedUserId::Number(12)
        );
        assert_eq!(
            ClaimedUserId::from(&UserId::new("abc")),
            ClaimedUserId::Text("abc".to_string())
        );
    }
}
