//! Shared test utilities for `gym-buddy`.
//!
//! This module provides common helper functions for setting up a test gym and creating
//! test entities with sensible defaults.

use crate::{
    config::AppConfig,
    core::{
        catalog::NewSession,
        clock::{ManualClock, SharedClock},
        gym::Gym,
        payment::CardPayment,
    },
    entities::{
        Membership, MembershipId, MembershipType, Role, Session, SessionId, User, UserId,
        UserKind,
    },
    errors::Result,
};
use chrono::{DateTime, TimeZone, Utc};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Installs a tracing subscriber that writes through the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Fixed instant all test clocks start from (2025-01-01 09:00 UTC).
#[must_use]
pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A clock frozen at [`test_epoch`].
#[must_use]
pub fn fixed_clock() -> SharedClock {
    Rc::new(ManualClock::new(test_epoch()))
}

/// An empty gym with default configuration and a frozen clock.
#[must_use]
pub fn setup_gym() -> Gym {
    init_test_tracing();
    Gym::new(fixed_clock(), &AppConfig::default())
}

/// A standalone user with an empty password hash. Not registered anywhere.
#[must_use]
pub fn test_user(id: i64, role: Role) -> User {
    User {
        id: UserId::new(id),
        name: format!("Test {role} {id}"),
        email: format!("{role}{id}@test.local"),
        phone: None,
        password_hash: String::new(),
        kind: UserKind::for_role(role),
    }
}

/// A standalone client holding a Basic membership issued now, valid for 30 days.
#[must_use]
pub fn client_with_membership(id: i64, clock: &SharedClock) -> User {
    let mut user = test_user(id, Role::Client);
    if let Some(profile) = user.as_client_mut() {
        profile.membership = Some(Membership::new(
            MembershipId::new(id),
            MembershipType::Basic,
            clock.now(),
            30,
        ));
    }
    user
}

/// A standalone session run by "Test Trainer".
#[must_use]
pub fn test_session(id: i64, capacity: u32) -> Session {
    Session::new(SessionId::new(id), format!("Session {id}"), "Test Trainer", capacity)
}

/// Registers a client with password `"password"` and name "Test Client".
pub fn register_test_client(gym: &mut Gym, email: &str) -> Result<UserId> {
    gym.directory
        .register(Role::Client, "Test Client", email, "password")
}

/// Registers a client and sells them a Basic membership by card.
pub fn client_with_test_membership(gym: &mut Gym, email: &str) -> Result<UserId> {
    let id = register_test_client(gym, email)?;
    gym.purchase(id, MembershipType::Basic, &mut CardPayment)?;
    Ok(id)
}

/// Schedules a session run by "Test Trainer".
pub fn create_test_session(gym: &mut Gym, name: &str, capacity: u32) -> Result<SessionId> {
    gym.catalog.create_session(NewSession {
        name: name.to_string(),
        trainer_name: "Test Trainer".to_string(),
        capacity,
        starts_at: None,
    })
}
