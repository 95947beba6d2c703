//! Suspension requests - clients ask to pause their membership, admins decide.
//!
//! An approved request extends the client's current membership by the requested number
//! of days. Requests are kept forever so the history stays visible to admins.

use crate::{
    core::{clock::SharedClock, directory::Directory},
    entities::{RequestId, SuspensionRequest, SuspensionStatus, User},
    errors::{Error, Result},
};
use tracing::{debug, info};

/// Longest suspension a client may request, in days.
pub const MAX_SUSPENSION_DAYS: u32 = 365;

/// Queue of suspension requests in submission order.
pub struct SuspensionRegistry {
    clock: SharedClock,
    requests: Vec<SuspensionRequest>,
    next_id: RequestId,
}

impl SuspensionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self {
            clock,
            requests: Vec::new(),
            next_id: RequestId::new(1),
        }
    }

    /// Queues a request from `client` to pause their membership for `days`.
    ///
    /// The client must currently hold a valid membership; pausing nothing is refused.
    pub fn submit(&mut self, client: &User, days: u32) -> Result<RequestId> {
        let user_id = client.id;
        let profile = client.as_client().ok_or(Error::NotAClient { user_id })?;
        if days == 0 || days > MAX_SUSPENSION_DAYS {
            return Err(Error::Validation {
                message: format!("Suspension must last between 1 and {MAX_SUSPENSION_DAYS} days"),
            });
        }
        let now = self.clock.now();
        if !profile.has_active_membership(now) {
            return Err(Error::NoActiveMembership { user_id });
        }

        let id = self.next_id;
        self.next_id = id.next();
        self.requests.push(SuspensionRequest {
            id,
            client_id: user_id,
            days,
            submitted_at: now,
            status: SuspensionStatus::Pending,
            resolved_at: None,
        });
        info!("User {} requested a {}-day suspension (request {})", user_id, days, id);
        Ok(id)
    }

    /// Requests still waiting for a decision, oldest first
    pub fn list_pending(&self) -> impl Iterator<Item = &SuspensionRequest> {
        self.requests.iter().filter(|r| !r.is_processed())
    }

    /// Every request ever submitted
    #[must_use]
    pub fn requests(&self) -> &[SuspensionRequest] {
        &self.requests
    }

    /// Looks up a request by id.
    pub fn get(&self, id: RequestId) -> Result<&SuspensionRequest> {
        self.requests
            .iter()
            .find(|r| r.id == id)
            .ok_or(Error::RequestNotFound { id })
    }

    /// Approves or rejects a pending request.
    ///
    /// On approval the client's current membership is extended by the requested days.
    /// If the extension cannot be represented the request stays pending and the error is
    /// returned. If the membership is inactive, or the client no longer holds one, the request is
    /// still marked approved and nothing else changes.
    pub fn resolve(
        &mut self,
        id: RequestId,
        approve: bool,
        directory: &mut Directory,
    ) -> Result<SuspensionStatus> {
        let now = self.clock.now();
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Error::RequestNotFound { id })?;
        if request.is_processed() {
            return Err(Error::AlreadyProcessed { id });
        }

        if approve {
            let client = directory.get_mut(request.client_id)?;
            let extended = match client.as_client_mut().and_then(|p| p.membership.as_mut()) {
                Some(membership) => membership.suspend(request.days)?,
                None => false,
            };
            if extended {
                info!(
                    "Approved request {}: membership of user {} extended by {} days",
                    id, request.client_id, request.days
                );
            } else {
                debug!(
                    "Approved request {} but user {} has no active membership to extend",
                    id, request.client_id
                );
            }
            request.status = SuspensionStatus::Approved;
        } else {
            info!("Rejected suspension request {}", id);
            request.status = SuspensionStatus::Rejected;
        }
        request.resolved_at = Some(now);
        Ok(request.status)
    }
}
