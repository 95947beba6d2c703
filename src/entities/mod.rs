//! Domain entities for the gym.

/// Typed integer identifiers
pub mod ids;
/// Membership entity
pub mod membership;
/// Session entity
pub mod session;
/// Suspension request entity
pub mod suspension;
/// User entity and role variants
pub mod user;

pub use ids::{MembershipId, RequestId, SessionId, UserId};
pub use membership::{Membership, MembershipType, SECONDS_PER_DAY};
pub use session::Session;
pub use suspension::{SuspensionRequest, SuspensionStatus};
pub use user::{ClientProfile, Role, User, UserKind};
