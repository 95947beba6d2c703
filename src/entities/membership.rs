//! Membership entity - a paid subscription window that makes a client eligible to book.

use super::MembershipId;
use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seconds in one day, used when extending a membership on suspension.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Membership level. Determines the price charged at purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    /// Entry level
    Basic,
    /// Mid tier
    Premium,
    /// Top tier
    Vip,
}

impl MembershipType {
    /// All membership types, cheapest first.
    pub const ALL: [Self; 3] = [Self::Basic, Self::Premium, Self::Vip];

    /// Returns the display name for this type.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Premium => "Premium",
            Self::Vip => "VIP",
        }
    }
}

impl fmt::Display for MembershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MembershipType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "premium" => Ok(Self::Premium),
            "vip" => Ok(Self::Vip),
            other => Err(format!("unknown membership type '{other}'")),
        }
    }
}

/// A membership held by exactly one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    id: MembershipId,
    membership_type: MembershipType,
    active: bool,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Membership {
    /// Creates an active membership valid for `duration_days` from `issued_at`.
    ///
    /// An expiry past the last representable instant is clamped to it.
    #[must_use]
    pub fn new(
        id: MembershipId,
        membership_type: MembershipType,
        issued_at: DateTime<Utc>,
        duration_days: u32,
    ) -> Self {
        Self {
            id,
            membership_type,
            active: true,
            issued_at,
            expires_at: issued_at
                .checked_add_signed(Duration::days(i64::from(duration_days)))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Membership id
    #[must_use]
    pub const fn id(&self) -> MembershipId {
        self.id
    }

    /// Membership level
    #[must_use]
    pub const fn membership_type(&self) -> MembershipType {
        self.membership_type
    }

    /// Whether the membership has not been deactivated
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// When the membership was sold
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// First instant at which the membership is no longer valid
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A membership is valid while it is active and `now` is strictly before expiry.
    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.active && now < self.expires_at
    }

    /// Pushes the expiry back by `days` whole days.
    ///
    /// Returns `Ok(false)` and leaves the membership untouched when it is inactive.
    /// Fails with `Validation` if the new expiry cannot be represented.
    pub fn suspend(&mut self, days: u32) -> Result<bool> {
        if !self.active {
            return Ok(false);
        }
        self.expires_at = self
            .expires_at
            .checked_add_signed(Duration::seconds(i64::from(days) * SECONDS_PER_DAY))
            .ok_or_else(|| Error::Validation {
                message: format!("membership {} cannot be extended by {days} days", self.id),
            })?;
        Ok(true)
    }

    /// Marks the membership inactive. It stays attached to the client but no longer
    /// grants booking rights.
    pub const fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;

    fn issued() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_membership_valid_for_duration() {
        let m = Membership::new(MembershipId::new(1), MembershipType::Basic, issued(), 30);
        assert!(m.is_active());
        assert_eq!(m.expires_at() - m.issued_at(), Duration::days(30));
        assert!(m.is_valid(issued()));
        assert!(m.is_valid(m.expires_at() - Duration::seconds(1)));
        assert!(!m.is_valid(m.expires_at()));
    }

    #[test]
    fn test_suspend_extends_expiry_by_whole_days() {
        let mut m = Membership::new(MembershipId::new(1), MembershipType::Vip, issued(), 30);
        let before = m.expires_at();
        assert!(m.suspend(7).unwrap());
        assert_eq!((m.expires_at() - before).num_seconds(), 7 * SECONDS_PER_DAY);
    }

    #[test]
    fn test_suspend_inactive_membership_is_noop() {
        let mut m = Membership::new(MembershipId::new(1), MembershipType::Premium, issued(), 30);
        m.deactivate();
        let before = m.expires_at();
        assert!(!m.suspend(7).unwrap());
        assert_eq!(m.expires_at(), before);
        assert!(!m.is_valid(issued()));
    }

    #[test]
    fn test_suspend_past_calendar_end_fails_cleanly() {
        let near_end = DateTime::<Utc>::MAX_UTC - Duration::days(40);
        let mut m = Membership::new(MembershipId::new(1), MembershipType::Basic, near_end, 30);
        let before = m.expires_at();
        assert!(matches!(m.suspend(365), Err(Error::Validation { .. })));
        assert_eq!(m.expires_at(), before);
        assert!(m.is_active());
    }

    #[test]
    fn test_new_membership_clamps_expiry() {
        let near_end = DateTime::<Utc>::MAX_UTC - Duration::days(1);
        let m = Membership::new(MembershipId::new(1), MembershipType::Vip, near_end, 30);
        assert_eq!(m.expires_at(), DateTime::<Utc>::MAX_UTC);
        assert!(m.is_valid(near_end));
    }

    #[test]
    fn test_membership_type_parsing() {
        assert_eq!("VIP".parse::<MembershipType>().unwrap(), MembershipType::Vip);
        assert_eq!(" premium".parse::<MembershipType>().unwrap(), MembershipType::Premium);
        assert!("gold".parse::<MembershipType>().is_err());
        assert_eq!(MembershipType::Vip.to_string(), "VIP");
    }
}
