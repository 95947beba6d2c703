//! User directory - registration and login.
//!
//! The directory owns every [`User`] for the lifetime of the process. Users are kept in
//! registration order and addressed by [`UserId`]; ids are never reused.

use crate::{
    core::password,
    entities::{Role, User, UserId, UserKind},
    errors::{Error, Result},
};
use tracing::{debug, info, warn};

/// Registration form for a new user.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    /// Role to register as
    pub role: Role,
    /// Display name
    pub name: &'a str,
    /// Email, normalized before storage
    pub email: &'a str,
    /// Plaintext password, hashed before storage
    pub password: &'a str,
    /// Optional phone number
    pub phone: Option<&'a str>,
}

/// Arena of registered users.
#[derive(Debug)]
pub struct Directory {
    users: Vec<User>,
    next_id: i64,
}

/// Trims and lowercases an email so lookups ignore case and stray spaces.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }

    /// Registers a user without a phone number.
    pub fn register(
        &mut self,
        role: Role,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId> {
        self.register_user(&NewUser {
            role,
            name,
            email,
            password,
            phone: None,
        })
    }

    /// Registers a user from a full form.
    ///
    /// Fails with `Validation` on an empty name, email or password and with
    /// `DuplicateEmail` if the normalized email is already taken.
    pub fn register_user(&mut self, form: &NewUser<'_>) -> Result<UserId> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(Error::Validation {
                message: "Name cannot be empty".to_string(),
            });
        }
        let email = normalize_email(form.email);
        if email.is_empty() {
            return Err(Error::Validation {
                message: "Email cannot be empty".to_string(),
            });
        }
        if form.password.is_empty() {
            return Err(Error::Validation {
                message: "Password cannot be empty".to_string(),
            });
        }
        if self.users.iter().any(|u| u.email == email) {
            warn!("Registration rejected, email {} already in use", email);
            return Err(Error::DuplicateEmail { email });
        }

        let password_hash = password::hash_password(form.password)?;
        let id = UserId::new(self.next_id);
        self.next_id += 1;

        self.users.push(User {
            id,
            name: name.to_string(),
            email,
            phone: form
                .phone
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(ToString::to_string),
            password_hash,
            kind: UserKind::for_role(form.role),
        });
        info!("Registered {} '{}' with id {}", form.role, name, id);
        Ok(id)
    }

    /// Resolves credentials to a user.
    ///
    /// Unknown email and wrong password both produce `AuthFailure`.
    pub fn login(&self, email: &str, password: &str) -> Result<&User> {
        let Some(user) = self.find_by_email(email) else {
            debug!("Login failed, no user with email {}", normalize_email(email));
            return Err(Error::AuthFailure);
        };
        if password::verify_password(password, &user.password_hash)? {
            info!("User {} logged in", user.id);
            Ok(user)
        } else {
            debug!("Login failed, wrong password for user {}", user.id);
            Err(Error::AuthFailure)
        }
    }

    /// Looks up a user by id.
    pub fn get(&self, id: UserId) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or(Error::UserNotFound { id })
    }

    /// Looks up a user by id for mutation.
    pub fn get_mut(&mut self, id: UserId) -> Result<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(Error::UserNotFound { id })
    }

    /// Looks up a user by email.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        let email = normalize_email(email);
        self.users.iter().find(|u| u.email == email)
    }

    /// All users in registration order
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    /// Number of registered users
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no user is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
