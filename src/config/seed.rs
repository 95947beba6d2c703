//! Seed data from the `[seed]` section of `gym.toml`.
//!
//! Seeding is idempotent per entry: users whose email is already registered are
//! skipped, so restarting against the same state never fails on duplicates.

use crate::{
    core::{catalog::NewSession, directory::NewUser, gym::Gym},
    entities::Role,
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, info};

/// The `[seed]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Users to register
    pub users: Vec<SeedUser>,
    /// Sessions to schedule
    pub sessions: Vec<SeedSession>,
}

/// One `[[seed.users]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    /// Role to register as
    pub role: Role,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Plaintext password, hashed on registration
    pub password: String,
    /// Optional phone
    #[serde(default)]
    pub phone: Option<String>,
}

/// One `[[seed.sessions]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedSession {
    /// Class name
    pub name: String,
    /// Trainer running it
    pub trainer: String,
    /// Total spots
    pub capacity: u32,
    /// Optional start time, e.g. `2025-12-12T10:00:00`
    #[serde(default)]
    pub starts_at: Option<NaiveDateTime>,
}

/// Counts of what seeding created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Users registered
    pub users: usize,
    /// Users skipped because the email was taken
    pub skipped_users: usize,
    /// Sessions scheduled
    pub sessions: usize,
}

/// Registers the seed users and schedules the seed sessions.
pub fn apply_seed(gym: &mut Gym, seed: &SeedConfig) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for user in &seed.users {
        let form = NewUser {
            role: user.role,
            name: &user.name,
            email: &user.email,
            password: &user.password,
            phone: user.phone.as_deref(),
        };
        match gym.directory.register_user(&form) {
            Ok(_) => summary.users += 1,
            Err(Error::DuplicateEmail { email }) => {
                debug!("Seed user {} already registered, skipping", email);
                summary.skipped_users += 1;
            }
            Err(e) => return Err(e),
        }
    }

    for session in &seed.sessions {
        gym.catalog.create_session(NewSession {
            name: session.name.clone(),
            trainer_name: session.trainer.clone(),
            capacity: session.capacity,
            starts_at: session.starts_at,
        })?;
        summary.sessions += 1;
    }

    info!(
        "Seeded {} users ({} skipped) and {} sessions",
        summary.users, summary.skipped_users, summary.sessions
    );
    Ok(summary)
}
