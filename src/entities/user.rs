//! User entity - every registered person, with client-only data on the client variant.

use super::{Membership, SessionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Gym member who buys memberships and books sessions
    Client,
    /// Staff member who runs sessions
    Trainer,
    /// Staff member who manages users, suspensions and reports
    Admin,
}

impl Role {
    /// Lowercase name as typed in the shell and config
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Trainer => "trainer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "trainer" => Ok(Self::Trainer),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Data only a client carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Current membership, replaced wholesale on every purchase
    pub membership: Option<Membership>,
    /// Ids of booked sessions. The same id may appear more than once.
    pub booked_session_ids: Vec<SessionId>,
}

impl ClientProfile {
    /// Whether the client holds a membership that is valid at `now`
    #[must_use]
    pub fn has_active_membership(&self, now: DateTime<Utc>) -> bool {
        self.membership.as_ref().is_some_and(|m| m.is_valid(now))
    }

    /// Number of times `session_id` appears in the booking list
    #[must_use]
    pub fn bookings_for(&self, session_id: SessionId) -> usize {
        self.booked_session_ids
            .iter()
            .filter(|id| **id == session_id)
            .count()
    }
}

/// Role-specific part of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserKind {
    /// Client with membership and bookings
    Client(ClientProfile),
    /// Trainer
    Trainer,
    /// Administrator
    Admin,
}

impl UserKind {
    /// Fresh role data for a newly registered user
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Client => Self::Client(ClientProfile::default()),
            Role::Trainer => Self::Trainer,
            Role::Admin => Self::Admin,
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique id
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Normalized (trimmed, lowercase) email, unique in the directory
    pub email: String,
    /// Optional contact phone
    pub phone: Option<String>,
    /// Argon2id PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role-specific data
    pub kind: UserKind,
}

impl User {
    /// The user's role
    #[must_use]
    pub const fn role(&self) -> Role {
        match self.kind {
            UserKind::Client(_) => Role::Client,
            UserKind::Trainer => Role::Trainer,
            UserKind::Admin => Role::Admin,
        }
    }

    /// Client data, if this user is a client
    #[must_use]
    pub const fn as_client(&self) -> Option<&ClientProfile> {
        match &self.kind {
            UserKind::Client(profile) => Some(profile),
            _ => None,
        }
    }

    /// Mutable client data, if this user is a client
    pub const fn as_client_mut(&mut self) -> Option<&mut ClientProfile> {
        match &mut self.kind {
            UserKind::Client(profile) => Some(profile),
            _ => None,
        }
    }

    /// Whether this user is staff (trainer or admin)
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self.kind, UserKind::Trainer | UserKind::Admin)
    }
}
