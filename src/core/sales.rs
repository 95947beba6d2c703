//! Membership sales - pricing, charging, and granting memberships.
//!
//! Every successful purchase is recorded in an append-only ledger that feeds the
//! revenue figure of the admin report.

use crate::{
    core::{clock::SharedClock, payment::PaymentMethod},
    entities::{Membership, MembershipId, MembershipType, User, UserId},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Price of each membership type.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Pricing {
    /// Price of a Basic membership
    pub basic: f64,
    /// Price of a Premium membership
    pub premium: f64,
    /// Price of a VIP membership
    pub vip: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            basic: 30.0,
            premium: 50.0,
            vip: 100.0,
        }
    }
}

impl Pricing {
    /// Price for `membership_type`
    #[must_use]
    pub const fn price_of(&self, membership_type: MembershipType) -> f64 {
        match membership_type {
            MembershipType::Basic => self.basic,
            MembershipType::Premium => self.premium,
            MembershipType::Vip => self.vip,
        }
    }
}

/// One completed purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sale {
    /// Membership that was granted
    pub membership_id: MembershipId,
    /// Buyer
    pub client_id: UserId,
    /// Type purchased
    pub membership_type: MembershipType,
    /// Amount charged
    pub amount: f64,
    /// Payment method name
    pub method: &'static str,
    /// Time of sale
    pub sold_at: DateTime<Utc>,
}

/// Sells memberships to clients.
pub struct SalesCoordinator {
    clock: SharedClock,
    pricing: Pricing,
    duration_days: u32,
    next_membership_id: MembershipId,
    ledger: Vec<Sale>,
}

impl SalesCoordinator {
    /// Creates a coordinator selling memberships valid for `duration_days`.
    #[must_use]
    pub fn new(clock: SharedClock, pricing: Pricing, duration_days: u32) -> Self {
        Self {
            clock,
            pricing,
            duration_days,
            next_membership_id: MembershipId::new(1),
            ledger: Vec::new(),
        }
    }

    /// Price for `membership_type`
    #[must_use]
    pub const fn price_of(&self, membership_type: MembershipType) -> f64 {
        self.pricing.price_of(membership_type)
    }

    /// Charges `client` for a membership and grants it.
    ///
    /// On success any previous membership is replaced. If the payment method declines,
    /// nothing about the client changes and `PaymentDeclined` is returned.
    pub fn purchase<'u>(
        &mut self,
        client: &'u mut User,
        membership_type: MembershipType,
        payment: &mut dyn PaymentMethod,
    ) -> Result<&'u Membership> {
        let client_id = client.id;
        let profile = client
            .as_client_mut()
            .ok_or(Error::NotAClient { user_id: client_id })?;

        let amount = self.price_of(membership_type);
        if !payment.charge(amount) {
            warn!(
                "{} payment of ${:.2} declined for user {}",
                payment.name(),
                amount,
                client_id
            );
            return Err(Error::PaymentDeclined {
                method: payment.name().to_string(),
                amount,
                membership_type,
            });
        }

        let now = self.clock.now();
        let membership_id = self.next_membership_id;
        self.next_membership_id = membership_id.next();

        self.ledger.push(Sale {
            membership_id,
            client_id,
            membership_type,
            amount,
            method: payment.name(),
            sold_at: now,
        });
        info!(
            "User {} bought {} membership {} for ${:.2} by {}",
            client_id,
            membership_type,
            membership_id,
            amount,
            payment.name()
        );

        Ok(profile.membership.insert(Membership::new(
            membership_id,
            membership_type,
            now,
            self.duration_days,
        )))
    }

    /// Every sale so far, oldest first
    #[must_use]
    pub fn sales(&self) -> &[Sale] {
        &self.ledger
    }

    /// Total amount charged across all sales
    #[must_use]
    pub fn revenue(&self) -> f64 {
        self.ledger.iter().map(|s| s.amount).sum()
    }
}
