//! Session catalog - the gym's schedule.
//!
//! Holds every [`Session`] in insertion order. Sessions are never removed.

use crate::{
    entities::{Session, SessionId},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use tracing::{info, warn};

/// Input for scheduling a session with an automatically assigned id.
#[derive(Debug, Clone)]
pub struct NewSession {
    /// Class name
    pub name: String,
    /// Trainer running it
    pub trainer_name: String,
    /// Total spots, at least one
    pub capacity: u32,
    /// Optional start time
    pub starts_at: Option<NaiveDateTime>,
}

/// Arena of sessions.
#[derive(Debug, Default)]
pub struct Catalog {
    sessions: Vec<Session>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }

    /// Appends a session that already carries an id.
    ///
    /// A session whose id is already in the catalog is rejected with `DuplicateSession`
    /// and the existing session is left as it was.
    pub fn add_session(&mut self, session: Session) -> Result<SessionId> {
        let id = session.id();
        if self.sessions.iter().any(|s| s.id() == id) {
            warn!("Rejected session '{}', id {} already in use", session.name(), id);
            return Err(Error::DuplicateSession { id });
        }
        info!(
            "Scheduled session {} '{}' with {} ({} spots)",
            id,
            session.name(),
            session.trainer_name(),
            session.capacity()
        );
        self.sessions.push(session);
        Ok(id)
    }

    /// Schedules a session under the next free id.
    pub fn create_session(&mut self, new: NewSession) -> Result<SessionId> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(Error::Validation {
                message: "Session name cannot be empty".to_string(),
            });
        }
        let trainer_name = new.trainer_name.trim();
        if trainer_name.is_empty() {
            return Err(Error::Validation {
                message: format!("Session '{name}' needs a trainer"),
            });
        }
        if new.capacity == 0 {
            return Err(Error::Validation {
                message: "Session capacity must be at least 1".to_string(),
            });
        }

        let mut session = Session::new(self.next_id(), name, trainer_name, new.capacity);
        if let Some(starts_at) = new.starts_at {
            session = session.with_start(starts_at);
        }
        self.add_session(session)
    }

    /// Id one past the highest id in use.
    #[must_use]
    pub fn next_id(&self) -> SessionId {
        self.sessions
            .iter()
            .map(Session::id)
            .max()
            .map_or(SessionId::new(1), SessionId::next)
    }

    /// Looks up a session by id.
    pub fn get_session(&self, id: SessionId) -> Result<&Session> {
        self.sessions
            .iter()
            .find(|s| s.id() == id)
            .ok_or(Error::SessionNotFound { id })
    }

    /// Looks up a session by id for mutation.
    pub fn get_session_mut(&mut self, id: SessionId) -> Result<&mut Session> {
        self.sessions
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(Error::SessionNotFound { id })
    }

    /// All sessions in the order they were added
    pub fn list_sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    /// Sessions run by the named trainer
    pub fn sessions_by_trainer<'a>(
        &'a self,
        trainer_name: &'a str,
    ) -> impl Iterator<Item = &'a Session> + 'a {
        self.sessions
            .iter()
            .filter(move |s| s.trainer_name() == trainer_name)
    }

    /// Number of sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the schedule is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Spots booked across every session
    #[must_use]
    pub fn total_booked(&self) -> u64 {
        self.sessions.iter().map(|s| u64::from(s.booked())).sum()
    }
}

/// Renders one schedule line, e.g. `[ID: 1] Yoga | Trainer: Peter | Date: 12.12.2025 10:00 | Spots: 2/2`.
#[must_use]
pub fn format_schedule_line(session: &Session) -> String {
    let date = session.starts_at().map_or_else(
        || "unscheduled".to_string(),
        |d| d.format("%d.%m.%Y %H:%M").to_string(),
    );
    format!(
        "[ID: {}] {} | Trainer: {} | Date: {} | Spots: {}/{}",
        session.id(),
        session.name(),
        session.trainer_name(),
        date,
        session.available_spots(),
        session.capacity()
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::NaiveDate;

    fn new_session(name: &str, capacity: u32) -> NewSession {
        NewSession {
            name: name.to_string(),
            trainer_name: "Peter Trainer".to_string(),
            capacity,
            starts_at: None,
        }
    }

    #[test]
    fn test_add_and_get_session() -> Result<()> {
        let mut catalog = Catalog::new();
        catalog.add_session(Session::new(SessionId::new(101), "Crossfit", "John Coach", 2))?;
        catalog.add_session(Session::new(SessionId::new(102), "Yoga", "Elena V.", 10))?;

        assert_eq!(catalog.get_session(SessionId::new(102))?.name(), "Yoga");
        assert!(matches!(
            catalog.get_session(SessionId::new(7)),
            Err(Error::SessionNotFound { .. })
        ));

        let names: Vec<_> = catalog.list_sessions().map(Session::name).collect();
        assert_eq!(names, ["Crossfit", "Yoga"]);
        // restartable
        assert_eq!(catalog.list_sessions().count(), 2);
        Ok(())
    }

    #[test]
    fn test_duplicate_session_id_rejected() -> Result<()> {
        let mut catalog = Catalog::new();
        catalog.add_session(Session::new(SessionId::new(101), "Crossfit", "John Coach", 2))?;
        let result = catalog.add_session(Session::new(SessionId::new(101), "Boxing", "Ann", 5));
        assert!(matches!(result, Err(Error::DuplicateSession { .. })));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_session(SessionId::new(101))?.name(), "Crossfit");
        Ok(())
    }

    #[test]
    fn test_create_session_allocates_after_highest_id() -> Result<()> {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.create_session(new_session("Yoga", 2))?, SessionId::new(1));
        catalog.add_session(Session::new(SessionId::new(50), "Crossfit", "John", 2))?;
        assert_eq!(catalog.create_session(new_session("Boxing", 10))?, SessionId::new(51));
        Ok(())
    }

    #[test]
    fn test_create_session_validation() {
        let mut catalog = Catalog::new();
        assert!(matches!(
            catalog.create_session(new_session(" ", 2)),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            catalog.create_session(new_session("Yoga", 0)),
            Err(Error::Validation { .. })
        ));
        let mut no_trainer = new_session("Yoga", 2);
        no_trainer.trainer_name = "  ".to_string();
        assert!(matches!(
            catalog.create_session(no_trainer),
            Err(Error::Validation { .. })
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_sessions_by_trainer() -> Result<()> {
        let mut catalog = Catalog::new();
        catalog.create_session(new_session("Yoga", 2))?;
        catalog.add_session(Session::new(SessionId::new(9), "Spin", "Someone Else", 4))?;
        let mine: Vec<_> = catalog.sessions_by_trainer("Peter Trainer").collect();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name(), "Yoga");
        Ok(())
    }

    #[test]
    fn test_format_schedule_line() {
        let start = NaiveDate::from_ymd_opt(2025, 12, 12)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let session = Session::new(SessionId::new(1), "Yoga", "Peter Trainer", 2).with_start(start);
        assert_eq!(
            format_schedule_line(&session),
            "[ID: 1] Yoga | Trainer: Peter Trainer | Date: 12.12.2025 10:00 | Spots: 2/2"
        );
        let bare = Session::new(SessionId::new(2), "Boxing", "Peter Trainer", 10);
        assert!(format_schedule_line(&bare).contains("Date: unscheduled"));
    }
}
