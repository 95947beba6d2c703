//! Admin report generation.
//!
//! Produces structured figures; the `Display` impl renders them as text for the shell.

use crate::{
    core::{
        catalog::Catalog, directory::Directory, sales::SalesCoordinator,
        suspension::SuspensionRegistry,
    },
    entities::Role,
};
use chrono::{DateTime, Utc};
use std::fmt;

/// Gym-wide activity figures.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminReport {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// All registered users
    pub total_users: usize,
    /// Registered clients
    pub clients: usize,
    /// Registered trainers
    pub trainers: usize,
    /// Registered admins
    pub admins: usize,
    /// Clients whose membership is valid at `generated_at`
    pub active_memberships: usize,
    /// Scheduled sessions
    pub total_sessions: usize,
    /// Spots booked across all sessions
    pub total_bookings: u64,
    /// Spots across all sessions
    pub total_capacity: u64,
    /// Number of memberships sold
    pub memberships_sold: usize,
    /// Money taken across all sales
    pub revenue: f64,
    /// Suspension requests awaiting a decision
    pub pending_suspensions: usize,
}

/// Collects the admin report from the gym's aggregates at `now`.
#[must_use]
pub fn generate_admin_report(
    directory: &Directory,
    catalog: &Catalog,
    sales: &SalesCoordinator,
    suspensions: &SuspensionRegistry,
    now: DateTime<Utc>,
) -> AdminReport {
    let count_role = |role: Role| directory.users().filter(|u| u.role() == role).count();
    let active_memberships = directory
        .users()
        .filter_map(|u| u.as_client())
        .filter(|p| p.has_active_membership(now))
        .count();

    AdminReport {
        generated_at: now,
        total_users: directory.len(),
        clients: count_role(Role::Client),
        trainers: count_role(Role::Trainer),
        admins: count_role(Role::Admin),
        active_memberships,
        total_sessions: catalog.len(),
        total_bookings: catalog.total_booked(),
        total_capacity: catalog
            .list_sessions()
            .map(|s| u64::from(s.capacity()))
            .sum(),
        memberships_sold: sales.sales().len(),
        revenue: sales.revenue(),
        pending_suspensions: suspensions.list_pending().count(),
    }
}

/// Share of capacity that is booked, as a percentage. Zero when there is no capacity.
#[must_use]
pub fn occupancy_percent(report: &AdminReport) -> f64 {
    if report.total_capacity == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = report.total_bookings as f64 / report.total_capacity as f64;
    ratio * 100.0
}

impl fmt::Display for AdminReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ADMIN REPORT ===")?;
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(
            f,
            "Total users: {} (clients: {}, trainers: {}, admins: {})",
            self.total_users, self.clients, self.trainers, self.admins
        )?;
        writeln!(f, "Active memberships: {}", self.active_memberships)?;
        writeln!(f, "Total sessions: {}", self.total_sessions)?;
        writeln!(
            f,
            "Total bookings: {} of {} spots ({:.1}%)",
            self.total_bookings,
            self.total_capacity,
            occupancy_percent(self)
        )?;
        writeln!(
            f,
            "Revenue: ${:.2} from {} memberships",
            self.revenue, self.memberships_sold
        )?;
        writeln!(f, "Pending suspensions: {}", self.pending_suspensions)?;
        write!(f, "====================")
    }
}
