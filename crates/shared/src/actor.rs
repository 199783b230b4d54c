//! Actor identity and the ordered role model.
//!
//! The subsystem never issues credentials itself; it consumes an
//! already-authenticated `{id, role}` pair. Role comparisons live here so
//! that read and write policy share a single ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Privilege tiers, ordered from lowest to highest.
///
/// An unauthenticated caller sits below every variant (it is represented as
/// the absence of an [`Actor`], not as a role).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Base member: may create resources and read public ones.
    Student,
    /// May read private resources.
    Teacher,
    /// Moderation tier: may edit and delete any resource.
    Coordinator,
    /// Administrator tier.
    Manager,
}

impl Role {
    /// Convert to the wire/database string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Coordinator => "coordinator",
            Self::Manager => "manager",
        }
    }

    /// Parse from the wire/database string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            "coordinator" => Some(Self::Coordinator),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }
}

/// The authenticated identity performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// User ID.
    pub id: Uuid,
    /// Privilege tier.
    pub role: Role,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub const fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// The user's role.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, role: Role, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the actor described by these claims, if the role is known.
    #[must_use]
    pub fn actor(&self) -> Option<Actor> {
        Role::parse(&self.role).map(|role| Actor::new(self.sub, role))
    }
}
