//! Shell layer - line-oriented text interface over the gym.
//!
//! The shell keeps track of who is logged in and enforces which role may run which
//! command. Everything else is delegated to [`Gym`].

/// Command parsing
pub mod command;

use crate::{
    core::{catalog::NewSession, catalog::format_schedule_line, gym::Gym},
    entities::{Role, User, UserId},
    errors::{Error, Result},
};
use command::{Command, HELP_TEXT, parse_command};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Result of running one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to show the user
    Reply(String),
    /// Stop reading input
    Quit,
}

/// Interactive session over a [`Gym`].
pub struct Shell {
    gym: Gym,
    current_user: Option<UserId>,
}

impl Shell {
    /// Wraps a gym with nobody logged in.
    #[must_use]
    pub const fn new(gym: Gym) -> Self {
        Self {
            gym,
            current_user: None,
        }
    }

    /// The wrapped gym
    #[must_use]
    pub const fn gym(&self) -> &Gym {
        &self.gym
    }

    /// Id of the logged-in user, if any
    #[must_use]
    pub const fn current_user(&self) -> Option<UserId> {
        self.current_user
    }

    /// Reads commands line by line until `quit` or end of input.
    ///
    /// Domain errors are printed and the loop continues; only I/O errors end it early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "=== GYM INFORMATION SYSTEM ===")?;
        writeln!(output, "Type 'help' for a list of commands.")?;
        for line in input.lines() {
            let line = line?;
            match self.execute(&line) {
                Ok(Outcome::Reply(text)) if text.is_empty() => {}
                Ok(Outcome::Reply(text)) => writeln!(output, "{text}")?,
                Ok(Outcome::Quit) => break,
                Err(e) => writeln!(output, "[Error]: {e}")?,
            }
            output.flush()?;
        }
        writeln!(output, "Goodbye.")?;
        Ok(())
    }

    /// Parses and runs a single line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let Some(command) = parse_command(line)? else {
            return Ok(Outcome::Reply(String::new()));
        };
        debug!("Executing {:?}", command);
        self.dispatch(command)
    }

    fn logged_in(&self) -> Result<&User> {
        let id = self.current_user.ok_or(Error::NotLoggedIn)?;
        self.gym.directory.get(id)
    }

    fn require(&self, allowed: impl Fn(&User) -> bool, action: &str) -> Result<&User> {
        let user = self.logged_in()?;
        if allowed(user) {
            Ok(user)
        } else {
            Err(Error::PermissionDenied {
                role: user.role(),
                action: action.to_string(),
            })
        }
    }

    fn require_role(&self, role: Role, action: &str) -> Result<&User> {
        self.require(|u| u.role() == role, action)
    }

    fn require_staff(&self, action: &str) -> Result<&User> {
        self.require(User::is_staff, action)
    }

    fn require_client(&self, action: &str) -> Result<UserId> {
        self.require_role(Role::Client, action).map(|u| u.id)
    }

    fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        let reply = match command {
            Command::Help => HELP_TEXT.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
            Command::Register {
                role,
                email,
                password,
                name,
            } => {
                let id = self.gym.directory.register(role, &name, &email, &password)?;
                format!("[Registration]: {role} {name} successfully added (ID: {id}).")
            }
            Command::Login { email, password } => {
                let user = self.gym.directory.login(&email, &password)?;
                let (id, name) = (user.id, user.name.clone());
                self.current_user = Some(id);
                let dashboard = self.gym.dashboard(id)?;
                format!("[Login]: Welcome, {name}!\n{dashboard}")
            }
            Command::Logout => {
                let user = self.logged_in()?;
                let reply = format!("[Logout]: Goodbye, {}.", user.name);
                info!("User {} logged out", user.id);
                self.current_user = None;
                reply
            }
            Command::WhoAmI => {
                let id = self.logged_in()?.id;
                self.gym.dashboard(id)?.to_string()
            }
            Command::Schedule => self.schedule(),
            Command::AddSession {
                capacity,
                starts_at,
                name,
            } => {
                let trainer_name = self.require_staff("add sessions")?.name.clone();
                let id = self.gym.catalog.create_session(NewSession {
                    name: name.clone(),
                    trainer_name,
                    capacity,
                    starts_at,
                })?;
                format!("[Schedule]: Session '{name}' added (ID: {id}).")
            }
            Command::Book(session_id) => {
                let user_id = self.require_client("book sessions")?;
                self.gym.book(user_id, session_id)?;
                let session = self.gym.catalog.get_session(session_id)?;
                format!("[Booking]: Successfully booked '{}'.", session.name())
            }
            Command::Cancel(session_id) => {
                let user_id = self.require_client("cancel bookings")?;
                self.gym.cancel(user_id, session_id)?;
                let session = self.gym.catalog.get_session(session_id)?;
                format!("[Booking]: Cancelled your spot in '{}'.", session.name())
            }
            Command::Buy {
                membership_type,
                payment,
            } => {
                let user_id = self.require_client("buy memberships")?;
                let mut method = payment.into_method();
                let id = self
                    .gym
                    .purchase(user_id, membership_type, method.as_mut())?;
                format!(
                    "[Membership]: {membership_type} membership {id} activated (paid ${:.2} by {payment}).",
                    self.gym.sales.price_of(membership_type)
                )
            }
            Command::Suspend { days } => {
                let user_id = self.require_client("request suspensions")?;
                let id = self.gym.request_suspension(user_id, days)?;
                format!("[Suspension]: Request {id} for {days} days submitted for approval.")
            }
            Command::Pending => {
                self.require_role(Role::Admin, "review suspensions")?;
                self.pending()
            }
            Command::Approve(id) => {
                self.require_role(Role::Admin, "approve suspensions")?;
                let status = self.gym.resolve_suspension(id, true)?;
                format!("[Suspension]: Request {id} {status}.")
            }
            Command::Reject(id) => {
                self.require_role(Role::Admin, "reject suspensions")?;
                let status = self.gym.resolve_suspension(id, false)?;
                format!("[Suspension]: Request {id} {status}.")
            }
            Command::Report => {
                self.require_role(Role::Admin, "view reports")?;
                self.gym.admin_report().to_string()
            }
        };
        Ok(Outcome::Reply(reply))
    }

    fn schedule(&self) -> String {
        let mut lines = vec!["--- CURRENT SCHEDULE ---".to_string()];
        if self.gym.catalog.is_empty() {
            lines.push("Schedule is empty.".to_string());
        } else {
            lines.extend(self.gym.catalog.list_sessions().map(format_schedule_line));
        }
        lines.push("------------------------".to_string());
        lines.join("\n")
    }

    fn pending(&self) -> String {
        let lines: Vec<String> = self
            .gym
            .suspensions
            .list_pending()
            .map(|r| {
                let who = self
                    .gym
                    .directory
                    .get(r.client_id)
                    .map_or_else(|_| r.client_id.to_string(), |u| u.name.clone());
                format!(
                    "[Request {}] {} asks for {} days (submitted {})",
                    r.id,
                    who,
                    r.days,
                    r.submitted_at.format("%d.%m.%Y %H:%M")
                )
            })
            .collect();
        if lines.is_empty() {
            "No pending suspension requests.".to_string()
        } else {
            lines.join("\n")
        }
    }
}
