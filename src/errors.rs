//! Unified error type for every gym operation.
//!
//! Domain outcomes (a full session, a declined payment, a bad password) are ordinary
//! variants here. Nothing in the library panics on them; callers decide how to
//! present them.

use crate::entities::{MembershipType, RequestId, Role, SessionId, UserId};
use thiserror::Error;

/// All errors produced by the library and the shell.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Standard I/O failure (shell input/output, config file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown email or wrong password. The two cases share one message.
    #[error("Invalid email or password")]
    AuthFailure,

    /// Another user already registered with this email
    #[error("Email already registered: {email}")]
    DuplicateEmail {
        /// Normalized email that collided
        email: String,
    },

    /// No user with this id
    #[error("User not found: {id}")]
    UserNotFound {
        /// Requested id
        id: UserId,
    },

    /// No session with this id
    #[error("Session not found: {id}")]
    SessionNotFound {
        /// Requested id
        id: SessionId,
    },

    /// No suspension request with this id
    #[error("Suspension request not found: {id}")]
    RequestNotFound {
        /// Requested id
        id: RequestId,
    },

    /// A session with this id is already in the catalog
    #[error("Session id already in use: {id}")]
    DuplicateSession {
        /// Colliding id
        id: SessionId,
    },

    /// Operation needs a client account
    #[error("User {user_id} is not a client")]
    NotAClient {
        /// Offending user
        user_id: UserId,
    },

    /// The acting user's role may not perform this action
    #[error("Permission denied: {role} cannot {action}")]
    PermissionDenied {
        /// Role of the acting user
        role: Role,
        /// Short description of the attempted action
        action: String,
    },

    /// Action needs a logged-in user
    #[error("Please log in first")]
    NotLoggedIn,

    /// Client has no membership, or it is inactive or expired
    #[error("User {user_id} has no active membership")]
    NoActiveMembership {
        /// Client without a valid membership
        user_id: UserId,
    },

    /// Every spot in the session is taken
    #[error("Session {session_id} is full ({capacity} spots)")]
    SessionFull {
        /// Full session
        session_id: SessionId,
        /// Its capacity
        capacity: u32,
    },

    /// Client tried to book a session twice while repeat bookings are disabled
    #[error("User {user_id} already booked session {session_id}")]
    AlreadyBooked {
        /// Client
        user_id: UserId,
        /// Session already in the client's list
        session_id: SessionId,
    },

    /// Client tried to cancel a session they never booked
    #[error("User {user_id} has no booking for session {session_id}")]
    NotBooked {
        /// Client
        user_id: UserId,
        /// Session missing from the client's list
        session_id: SessionId,
    },

    /// The payment method refused the charge
    #[error("{method} payment of ${amount:.2} for {membership_type} membership was declined")]
    PaymentDeclined {
        /// Payment method name
        method: String,
        /// Amount that was attempted
        amount: f64,
        /// Membership being purchased
        membership_type: MembershipType,
    },

    /// Suspension request was already approved or rejected
    #[error("Suspension request {id} was already processed")]
    AlreadyProcessed {
        /// Request id
        id: RequestId,
    },

    /// Input failed validation
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong
        message: String,
    },

    /// Password hashing or hash parsing failed
    #[error("Password hash error: {message}")]
    PasswordHash {
        /// Underlying error text
        message: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
