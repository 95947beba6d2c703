//! Booking business logic - reserving and releasing session spots for clients.
//!
//! The session's booked count is the source of truth for capacity; the client's list of
//! session ids is bookkeeping. Both are updated together or not at all.

use crate::{
    core::clock::SharedClock,
    entities::{Session, User},
    errors::{Error, Result},
};
use serde::Deserialize;
use tracing::{debug, info};

/// Rules applied on top of the capacity and membership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookingPolicy {
    /// Whether a client may hold several spots in the same session
    pub allow_repeat_bookings: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            allow_repeat_bookings: true,
        }
    }
}

/// Enforces the booking and cancellation rules between a client, a session and the
/// client's membership.
pub struct BookingCoordinator {
    clock: SharedClock,
    policy: BookingPolicy,
}

impl BookingCoordinator {
    /// Creates a coordinator that reads the time from `clock`.
    #[must_use]
    pub fn new(clock: SharedClock, policy: BookingPolicy) -> Self {
        Self { clock, policy }
    }

    /// Books one spot in `session` for `client`.
    ///
    /// Checks run in order: the user must be a client, must hold a membership that is
    /// valid right now, must not already hold the session when repeat bookings are
    /// disabled, and the session must have a free spot.
    pub fn book(&self, client: &mut User, session: &mut Session) -> Result<()> {
        let user_id = client.id;
        let now = self.clock.now();
        let profile = client
            .as_client_mut()
            .ok_or(Error::NotAClient { user_id })?;

        if !profile.has_active_membership(now) {
            debug!("Booking refused for {}: no active membership", user_id);
            return Err(Error::NoActiveMembership { user_id });
        }

        if !self.policy.allow_repeat_bookings && profile.bookings_for(session.id()) > 0 {
            return Err(Error::AlreadyBooked {
                user_id,
                session_id: session.id(),
            });
        }

        if !session.reserve_spot() {
            debug!("Booking refused for {}: session {} is full", user_id, session.id());
            return Err(Error::SessionFull {
                session_id: session.id(),
                capacity: session.capacity(),
            });
        }

        profile.booked_session_ids.push(session.id());
        info!(
            "User {} booked a spot in '{}' ({}/{} taken)",
            user_id,
            session.name(),
            session.booked(),
            session.capacity()
        );
        Ok(())
    }

    /// Cancels one of `client`'s bookings for `session`.
    ///
    /// Removes a single occurrence of the session id and frees a single spot.
    pub fn cancel(&self, client: &mut User, session: &mut Session) -> Result<()> {
        let user_id = client.id;
        let profile = client
            .as_client_mut()
            .ok_or(Error::NotAClient { user_id })?;

        let position = profile
            .booked_session_ids
            .iter()
            .position(|id| *id == session.id())
            .ok_or(Error::NotBooked {
                user_id,
                session_id: session.id(),
            })?;

        profile.booked_session_ids.remove(position);
        session.release_spot();
        info!(
            "User {} cancelled a spot in '{}' ({}/{} taken)",
            user_id,
            session.name(),
            session.booked(),
            session.capacity()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::entities::{Role, SessionId};
    use crate::test_utils::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use std::rc::Rc;

    #[test]
    fn test_capacity_two_scenario() -> Result<()> {
        let clock = fixed_clock();
        let booking = BookingCoordinator::new(clock.clone(), BookingPolicy::default());
        let mut a = client_with_membership(1, &clock);
        let mut b = client_with_membership(2, &clock);
        let mut c = client_with_membership(3, &clock);
        let mut session = test_session(101, 2);

        booking.book(&mut a, &mut session)?;
        assert_eq!(session.booked(), 1);
        booking.book(&mut b, &mut session)?;
        assert_eq!(session.booked(), 2);

        let result = booking.book(&mut c, &mut session);
        assert!(matches!(
            result,
            Err(Error::SessionFull { capacity: 2, .. })
        ));
        assert_eq!(session.booked(), 2);
        assert!(c.as_client().unwrap().booked_session_ids.is_empty());
        Ok(())
    }

    #[test]
    fn test_book_without_membership_fails() {
        let clock = fixed_clock();
        let booking = BookingCoordinator::new(clock, BookingPolicy::default());
        let mut client = test_user(1, Role::Client);
        let mut session = test_session(101, 2);

        let result = booking.book(&mut client, &mut session);
        assert!(matches!(result, Err(Error::NoActiveMembership { .. })));
        assert_eq!(session.booked(), 0);
    }

    #[test]
    fn test_book_fails_once_membership_expires() -> Result<()> {
        let manual = Rc::new(ManualClock::new(test_epoch()));
        let clock: SharedClock = manual.clone();
        let booking = BookingCoordinator::new(clock.clone(), BookingPolicy::default());
        let mut client = client_with_membership(1, &clock);
        let mut session = test_session(101, 10);

        manual.advance(Duration::days(30) - Duration::seconds(1));
        booking.book(&mut client, &mut session)?;

        manual.advance(Duration::seconds(1));
        let result = booking.book(&mut client, &mut session);
        assert!(matches!(result, Err(Error::NoActiveMembership { .. })));
        assert_eq!(session.booked(), 1);
        Ok(())
    }

    #[test]
    fn test_book_with_inactive_membership_fails() {
        let clock = fixed_clock();
        let booking = BookingCoordinator::new(clock.clone(), BookingPolicy::default());
        let mut client = client_with_membership(1, &clock);
        if let Some(m) = client.as_client_mut().unwrap().membership.as_mut() {
            m.deactivate();
        }
        let mut session = test_session(101, 2);
        assert!(matches!(
            booking.book(&mut client, &mut session),
            Err(Error::NoActiveMembership { .. })
        ));
    }

    #[test]
    fn test_staff_cannot_book() {
        let booking = BookingCoordinator::new(fixed_clock(), BookingPolicy::default());
        let mut trainer = test_user(2, Role::Trainer);
        let mut session = test_session(101, 2);
        assert!(matches!(
            booking.book(&mut trainer, &mut session),
            Err(Error::NotAClient { .. })
        ));
        assert!(matches!(
            booking.cancel(&mut trainer, &mut session),
            Err(Error::NotAClient { .. })
        ));
    }

    #[test]
    fn test_repeat_booking_allowed_by_default() -> Result<()> {
        let clock = fixed_clock();
        let booking = BookingCoordinator::new(clock.clone(), BookingPolicy::default());
        let mut client = client_with_membership(1, &clock);
        let mut session = test_session(101, 2);

        booking.book(&mut client, &mut session)?;
        booking.book(&mut client, &mut session)?;
        assert_eq!(session.booked(), 2);
        assert_eq!(client.as_client().unwrap().bookings_for(SessionId::new(101)), 2);
        Ok(())
    }

    #[test]
    fn test_repeat_booking_rejected_when_disabled() -> Result<()> {
        let clock = fixed_clock();
        let policy = BookingPolicy {
            allow_repeat_bookings: false,
        };
        let booking = BookingCoordinator::new(clock.clone(), policy);
        let mut client = client_with_membership(1, &clock);
        let mut session = test_session(101, 5);

        booking.book(&mut client, &mut session)?;
        assert!(matches!(
            booking.book(&mut client, &mut session),
            Err(Error::AlreadyBooked { .. })
        ));
        assert_eq!(session.booked(), 1);
        Ok(())
    }

    #[test]
    fn test_cancel_restores_state() -> Result<()> {
        let clock = fixed_clock();
        let booking = BookingCoordinator::new(clock.clone(), BookingPolicy::default());
        let mut client = client_with_membership(1, &clock);
        let mut session = test_session(101, 3);
        let mut other = test_session(102, 3);
        booking.book(&mut client, &mut other)?;

        let before_list = client.as_client().unwrap().booked_session_ids.clone();
        let before_count = session.booked();

        booking.book(&mut client, &mut session)?;
        booking.cancel(&mut client, &mut session)?;

        assert_eq!(session.booked(), before_count);
        assert_eq!(client.as_client().unwrap().booked_session_ids, before_list);
        Ok(())
    }

    #[test]
    fn test_cancel_removes_single_occurrence() -> Result<()> {
        let clock = fixed_clock();
        let booking = BookingCoordinator::new(clock.clone(), BookingPolicy::default());
        let mut client = client_with_membership(1, &clock);
        let mut session = test_session(101, 3);

        booking.book(&mut client, &mut session)?;
        booking.book(&mut client, &mut session)?;
        booking.cancel(&mut client, &mut session)?;

        assert_eq!(session.booked(), 1);
        assert_eq!(client.as_client().unwrap().bookings_for(SessionId::new(101)), 1);
        Ok(())
    }

    #[test]
    fn test_cancel_never_booked_fails() {
        let clock = fixed_clock();
        let booking = BookingCoordinator::new(clock.clone(), BookingPolicy::default());
        let mut client = client_with_membership(1, &clock);
        let mut session = test_session(101, 3);

        let result = booking.cancel(&mut client, &mut session);
        assert!(matches!(result, Err(Error::NotBooked { .. })));
        assert_eq!(session.booked(), 0);
    }

    #[test]
    fn test_cancel_allowed_after_membership_expires() -> Result<()> {
        let manual = Rc::new(ManualClock::new(test_epoch()));
        let clock: SharedClock = manual.clone();
        let booking = BookingCoordinator::new(clock.clone(), BookingPolicy::default());
        let mut client = client_with_membership(1, &clock);
        let mut session = test_session(101, 3);

        booking.book(&mut client, &mut session)?;
        manual.advance(Duration::days(60));
        booking.cancel(&mut client, &mut session)?;
        assert_eq!(session.booked(), 0);
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_booked_count_stays_within_capacity(
            capacity in 1u32..5,
            ops in proptest::collection::vec((any::<bool>(), 0usize..3), 0..40),
        ) {
            let clock = fixed_clock();
            let booking = BookingCoordinator::new(clock.clone(), BookingPolicy::default());
            let mut clients: Vec<_> = (1..=3).map(|i| client_with_membership(i, &clock)).collect();
            let mut session = test_session(101, capacity);

            for (is_book, who) in ops {
                let client = &mut clients[who];
                let result = if is_book {
                    booking.book(client, &mut session)
                } else {
                    booking.cancel(client, &mut session)
                };
                if is_book && result.is_err() {
                    prop_assert_eq!(session.booked(), capacity);
                }
                prop_assert!(session.booked() <= capacity);
                let held: usize = clients
                    .iter()
                    .map(|c| c.as_client().unwrap().bookings_for(session.id()))
                    .sum();
                prop_assert_eq!(held, session.booked() as usize);
            }
        }
    }
}
