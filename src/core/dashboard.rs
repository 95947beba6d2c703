//! Per-role dashboard summaries shown after login.

use crate::{
    core::{catalog::Catalog, suspension::SuspensionRegistry},
    entities::{MembershipId, MembershipType, SessionId, User, UserKind},
};
use chrono::{DateTime, Utc};
use std::fmt;

/// Membership state as a client sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipStatus {
    /// Never bought one
    None,
    /// Valid right now
    Active {
        /// Membership id
        id: MembershipId,
        /// Type
        membership_type: MembershipType,
        /// Expiry
        expires_at: DateTime<Utc>,
    },
    /// Held but deactivated or past expiry
    Lapsed {
        /// Membership id
        id: MembershipId,
    },
}

/// What a user sees on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dashboard {
    /// Client view
    Client {
        /// Client name
        name: String,
        /// Membership state
        membership: MembershipStatus,
        /// Number of spots held
        booked_sessions: usize,
    },
    /// Trainer view
    Trainer {
        /// Trainer name
        name: String,
        /// Sessions this trainer runs
        sessions: Vec<SessionId>,
    },
    /// Admin view
    Admin {
        /// Admin name
        name: String,
        /// Suspension requests awaiting a decision
        pending_suspensions: usize,
    },
}

/// Builds the dashboard for `user` at `now`.
#[must_use]
pub fn build_dashboard(
    user: &User,
    catalog: &Catalog,
    suspensions: &SuspensionRegistry,
    now: DateTime<Utc>,
) -> Dashboard {
    let name = user.name.clone();
    match &user.kind {
        UserKind::Client(profile) => {
            let membership = match &profile.membership {
                None => MembershipStatus::None,
                Some(m) if m.is_valid(now) => MembershipStatus::Active {
                    id: m.id(),
                    membership_type: m.membership_type(),
                    expires_at: m.expires_at(),
                },
                Some(m) => MembershipStatus::Lapsed { id: m.id() },
            };
            Dashboard::Client {
                name,
                membership,
                booked_sessions: profile.booked_session_ids.len(),
            }
        }
        UserKind::Trainer => Dashboard::Trainer {
            sessions: catalog
                .sessions_by_trainer(&user.name)
                .map(|s| s.id())
                .collect(),
            name,
        },
        UserKind::Admin => Dashboard::Admin {
            name,
            pending_suspensions: suspensions.list_pending().count(),
        },
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client {
                name,
                membership,
                booked_sessions,
            } => {
                writeln!(f, "--- CLIENT DASHBOARD: {name} ---")?;
                match membership {
                    MembershipStatus::None => writeln!(f, "Status: No Active Membership")?,
                    MembershipStatus::Active {
                        id,
                        membership_type,
                        expires_at,
                    } => writeln!(
                        f,
                        "Status: Active {membership_type} Membership (ID: {id}, until {})",
                        expires_at.format("%d.%m.%Y")
                    )?,
                    MembershipStatus::Lapsed { id } => {
                        writeln!(f, "Status: Membership {id} is no longer active")?;
                    }
                }
                write!(f, "Booked Sessions: {booked_sessions}")
            }
            Self::Trainer { name, sessions } => {
                writeln!(f, "--- TRAINER DASHBOARD: {name} ---")?;
                write!(f, "Sessions you run: {}", sessions.len())
            }
            Self::Admin {
                name,
                pending_suspensions,
            } => {
                writeln!(f, "--- ADMIN DASHBOARD: {name} ---")?;
                write!(f, "Pending suspension requests: {pending_suspensions}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::payment::CardPayment;
    use crate::entities::Role;
    use crate::errors::Result;
    use crate::test_utils::*;
    use chrono::Duration;

    #[test]
    fn test_client_dashboard_tracks_membership() -> Result<()> {
        let mut gym = setup_gym();
        let id = register_test_client(&mut gym, "alex@mail.com")?;

        let dash = gym.dashboard(id)?;
        assert!(matches!(
            dash,
            Dashboard::Client {
                membership: MembershipStatus::None,
                booked_sessions: 0,
                ..
            }
        ));
        assert!(dash.to_string().contains("No Active Membership"));

        gym.purchase(id, MembershipType::Vip, &mut CardPayment)?;
        let session = create_test_session(&mut gym, "Crossfit", 2)?;
        gym.book(id, session)?;
        let dash = gym.dashboard(id)?;
        assert!(matches!(
            dash,
            Dashboard::Client {
                membership: MembershipStatus::Active {
                    membership_type: MembershipType::Vip,
                    ..
                },
                booked_sessions: 1,
                ..
            }
        ));
        assert!(dash.to_string().contains("Booked Sessions: 1"));

        let later = gym.clock.now() + Duration::days(31);
        let user = gym.directory.get(id)?;
        let lapsed = build_dashboard(user, &gym.catalog, &gym.suspensions, later);
        assert!(matches!(
            lapsed,
            Dashboard::Client {
                membership: MembershipStatus::Lapsed { .. },
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn test_trainer_and_admin_dashboards() -> Result<()> {
        let mut gym = setup_gym();
        let trainer = gym
            .directory
            .register(Role::Trainer, "Test Trainer", "coach@gym.local", "pw")?;
        let admin = gym
            .directory
            .register(Role::Admin, "Ivan Admin", "admin@gym.local", "pw")?;
        let session = create_test_session(&mut gym, "Yoga", 2)?;

        assert_eq!(
            gym.dashboard(trainer)?,
            Dashboard::Trainer {
                name: "Test Trainer".to_string(),
                sessions: vec![session],
            }
        );
        assert_eq!(
            gym.dashboard(admin)?,
            Dashboard::Admin {
                name: "Ivan Admin".to_string(),
                pending_suspensions: 0,
            }
        );
        Ok(())
    }
}
