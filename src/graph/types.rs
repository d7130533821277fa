//! Core type definitions for the referral graph

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        UserId(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

impl From<&UserId> for UserId {
    fn from(id: &UserId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UserId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for UserId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for UserId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// `referrer` introduced `candidate`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferralEdge {
    pub referrer: UserId,
    pub candidate: UserId,
}

impl ReferralEdge {
    pub fn new(referrer: impl Into<UserId>, candidate: impl Into<UserId>) -> Self {
        ReferralEdge {
            referrer: referrer.into(),
            candidate: candidate.into(),
        }
    }
}

impl fmt::Display for ReferralEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.referrer, self.candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id() {
        let id = UserId::new("user_001");
        assert_eq!(id.as_str(), "user_001");
        assert_eq!(format!("{}", id), "user_001");
        assert_eq!(id, "user_001");

        let id2: UserId = "user_002".into();
        assert!(id < id2);
    }

    #[test]
    fn test_user_id_serializes_as_string() {
        let id = UserId::new("alice");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"alice\"");
    }

    #[test]
    fn test_edge_from_json() {
        let edge: ReferralEdge =
            serde_json::from_str(r#"{"referrer": "a", "candidate": "b"}"#).unwrap();
        assert_eq!(edge, ReferralEdge::new("a", "b"));
        assert_eq!(edge.to_string(), "a -> b");
    }
}
