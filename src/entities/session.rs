//! Session entity - a scheduled class with a fixed number of spots.

use super::SessionId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A bookable class.
///
/// `booked` never exceeds `capacity`; only [`Session::reserve_spot`] and
/// [`Session::release_spot`] change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    name: String,
    trainer_name: String,
    starts_at: Option<NaiveDateTime>,
    capacity: u32,
    booked: u32,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new(
        id: SessionId,
        name: impl Into<String>,
        trainer_name: impl Into<String>,
        capacity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            trainer_name: trainer_name.into(),
            starts_at: None,
            capacity,
            booked: 0,
        }
    }

    /// Sets the scheduled start time.
    #[must_use]
    pub fn with_start(mut self, starts_at: NaiveDateTime) -> Self {
        self.starts_at = Some(starts_at);
        self
    }

    /// Session id
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Class name (e.g. "Yoga")
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the trainer running the class
    #[must_use]
    pub fn trainer_name(&self) -> &str {
        &self.trainer_name
    }

    /// Scheduled start, if one was given
    #[must_use]
    pub const fn starts_at(&self) -> Option<NaiveDateTime> {
        self.starts_at
    }

    /// Total spots
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Spots taken
    #[must_use]
    pub const fn booked(&self) -> u32 {
        self.booked
    }

    /// Spots still free
    #[must_use]
    pub const fn available_spots(&self) -> u32 {
        self.capacity.saturating_sub(self.booked)
    }

    /// Whether at least one spot is free
    #[must_use]
    pub const fn has_space(&self) -> bool {
        self.booked < self.capacity
    }

    /// Takes one spot. Returns `false` without changing anything if the session is full.
    pub(crate) const fn reserve_spot(&mut self) -> bool {
        if !self.has_space() {
            return false;
        }
        self.booked += 1;
        true
    }

    /// Frees one spot, never going below zero.
    pub(crate) const fn release_spot(&mut self) {
        self.booked = self.booked.saturating_sub(1);
    }
}
