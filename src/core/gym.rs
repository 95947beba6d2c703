//! The gym as a whole - every aggregate and coordinator behind one handle.
//!
//! `Gym` owns the directory, catalog, and registries and passes disjoint borrows to the
//! coordinators, so callers can work in ids instead of juggling references.

use crate::{
    config::AppConfig,
    core::{
        booking::BookingCoordinator,
        catalog::Catalog,
        clock::SharedClock,
        dashboard::{Dashboard, build_dashboard},
        directory::Directory,
        payment::PaymentMethod,
        report::{AdminReport, generate_admin_report},
        sales::SalesCoordinator,
        suspension::SuspensionRegistry,
    },
    entities::{MembershipId, MembershipType, RequestId, SessionId, SuspensionStatus, UserId},
    errors::Result,
};

/// All gym state for one process.
pub struct Gym {
    /// Time source shared with the coordinators
    pub clock: SharedClock,
    /// Registered users
    pub directory: Directory,
    /// Scheduled sessions
    pub catalog: Catalog,
    /// Booking rules
    pub booking: BookingCoordinator,
    /// Membership sales and ledger
    pub sales: SalesCoordinator,
    /// Suspension requests
    pub suspensions: SuspensionRegistry,
}

impl Gym {
    /// Builds an empty gym using the prices, durations and policy from `config`.
    ///
    /// Seed data is not applied here; see [`crate::config::seed::apply_seed`].
    #[must_use]
    pub fn new(clock: SharedClock, config: &AppConfig) -> Self {
        Self {
            directory: Directory::new(),
            catalog: Catalog::new(),
            booking: BookingCoordinator::new(clock.clone(), config.booking),
            sales: SalesCoordinator::new(
                clock.clone(),
                config.pricing,
                config.membership.duration_days,
            ),
            suspensions: SuspensionRegistry::new(clock.clone()),
            clock,
        }
    }

    /// Books `session_id` for `user_id`.
    pub fn book(&mut self, user_id: UserId, session_id: SessionId) -> Result<()> {
        let session = self.catalog.get_session_mut(session_id)?;
        let client = self.directory.get_mut(user_id)?;
        self.booking.book(client, session)
    }

    /// Cancels one booking of `session_id` for `user_id`.
    pub fn cancel(&mut self, user_id: UserId, session_id: SessionId) -> Result<()> {
        let session = self.catalog.get_session_mut(session_id)?;
        let client = self.directory.get_mut(user_id)?;
        self.booking.cancel(client, session)
    }

    /// Sells a membership to `user_id`.
    pub fn purchase(
        &mut self,
        user_id: UserId,
        membership_type: MembershipType,
        payment: &mut dyn PaymentMethod,
    ) -> Result<MembershipId> {
        let client = self.directory.get_mut(user_id)?;
        self.sales
            .purchase(client, membership_type, payment)
            .map(|m| m.id())
    }

    /// Files a suspension request on behalf of `user_id`.
    pub fn request_suspension(&mut self, user_id: UserId, days: u32) -> Result<RequestId> {
        let client = self.directory.get(user_id)?;
        self.suspensions.submit(client, days)
    }

    /// Approves or rejects a suspension request.
    pub fn resolve_suspension(
        &mut self,
        request_id: RequestId,
        approve: bool,
    ) -> Result<SuspensionStatus> {
        self.suspensions
            .resolve(request_id, approve, &mut self.directory)
    }

    /// Current admin report
    #[must_use]
    pub fn admin_report(&self) -> AdminReport {
        generate_admin_report(
            &self.directory,
            &self.catalog,
            &self.sales,
            &self.suspensions,
            self.clock.now(),
        )
    }

    /// Dashboard for `user_id`
    pub fn dashboard(&self, user_id: UserId) -> Result<Dashboard> {
        let user = self.directory.get(user_id)?;
        Ok(build_dashboard(
            user,
            &self.catalog,
            &self.suspensions,
            self.clock.now(),
        ))
    }
}
