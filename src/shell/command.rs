//! Parsing of shell input lines into commands.

use crate::{
    core::payment::PaymentKind,
    entities::{MembershipType, RequestId, Role, SessionId},
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the command list
    Help,
    /// Register a new user
    Register {
        /// Role
        role: Role,
        /// Email
        email: String,
        /// Password
        password: String,
        /// Display name (rest of the line)
        name: String,
    },
    /// Log in
    Login {
        /// Email
        email: String,
        /// Password
        password: String,
    },
    /// Log out
    Logout,
    /// Show the current user's dashboard
    WhoAmI,
    /// Show all sessions
    Schedule,
    /// Schedule a session run by the current user
    AddSession {
        /// Spots
        capacity: u32,
        /// Optional start
        starts_at: Option<NaiveDateTime>,
        /// Class name (rest of the line)
        name: String,
    },
    /// Book a spot
    Book(SessionId),
    /// Cancel a booking
    Cancel(SessionId),
    /// Buy a membership
    Buy {
        /// Type
        membership_type: MembershipType,
        /// Payment method
        payment: PaymentKind,
    },
    /// Request a suspension
    Suspend {
        /// Requested days
        days: u32,
    },
    /// List pending suspension requests
    Pending,
    /// Approve a suspension request
    Approve(RequestId),
    /// Reject a suspension request
    Reject(RequestId),
    /// Admin report
    Report,
    /// Leave the shell
    Quit,
}

/// Usage text printed by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  register <client|trainer|admin> <email> <password> <name...>
  login <email> <password>
  logout
  whoami
  schedule
  add-session <capacity> [<dd.mm.yyyy> <HH:MM>] <name...>   (trainer/admin)
  book <session-id>                                          (client)
  cancel <session-id>                                        (client)
  buy <basic|premium|vip> <card|cash>                        (client)
  suspend <days>                                             (client)
  pending                                                    (admin)
  approve <request-id> | reject <request-id>                 (admin)
  report                                                     (admin)
  help
  quit";

fn usage(text: &str) -> Error {
    Error::Validation {
        message: format!("usage: {text}"),
    }
}

fn parse_arg<T: std::str::FromStr>(raw: Option<&str>, usage_text: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let raw = raw.ok_or_else(|| usage(usage_text))?;
    raw.parse().map_err(|e| Error::Validation {
        message: format!("invalid value '{raw}': {e}"),
    })
}

fn rest(tokens: &[&str]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// `dd.mm.yyyy`-shaped token: three dot-separated groups of digits.
fn looks_like_date(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_start(date: &str, time: Option<&str>) -> Result<NaiveDateTime> {
    let invalid = || Error::Validation {
        message: format!(
            "invalid start '{date} {}', expected dd.mm.yyyy HH:MM",
            time.unwrap_or_default()
        ),
    };
    let date = NaiveDate::parse_from_str(date, "%d.%m.%Y").map_err(|_| invalid())?;
    let time = time
        .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
        .ok_or_else(invalid)?;
    Ok(date.and_time(time))
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "register" => {
            const USAGE: &str = "register <client|trainer|admin> <email> <password> <name...>";
            Command::Register {
                role: parse_arg(args.first().copied(), USAGE)?,
                email: parse_arg(args.get(1).copied(), USAGE)?,
                password: parse_arg(args.get(2).copied(), USAGE)?,
                name: rest(args.get(3..).unwrap_or_default()).ok_or_else(|| usage(USAGE))?,
            }
        }
        "login" => {
            const USAGE: &str = "login <email> <password>";
            Command::Login {
                email: parse_arg(args.first().copied(), USAGE)?,
                password: parse_arg(args.get(1).copied(), USAGE)?,
            }
        }
        "logout" => Command::Logout,
        "whoami" | "dashboard" => Command::WhoAmI,
        "schedule" | "sessions" => Command::Schedule,
        "add-session" => {
            const USAGE: &str = "add-session <capacity> [<dd.mm.yyyy> <HH:MM>] <name...>";
            let capacity = parse_arg(args.first().copied(), USAGE)?;
            let starts_at = match args.get(1) {
                Some(d) if looks_like_date(d) => Some(parse_start(d, args.get(2).copied())?),
                _ => None,
            };
            let name_from = if starts_at.is_some() { 3 } else { 1 };
            Command::AddSession {
                capacity,
                starts_at,
                name: rest(args.get(name_from..).unwrap_or_default())
                    .ok_or_else(|| usage(USAGE))?,
            }
        }
        "book" => Command::Book(parse_arg(args.first().copied(), "book <session-id>")?),
        "cancel" => Command::Cancel(parse_arg(args.first().copied(), "cancel <session-id>")?),
        "buy" => {
            const USAGE: &str = "buy <basic|premium|vip> <card|cash>";
            Command::Buy {
                membership_type: parse_arg(args.first().copied(), USAGE)?,
                payment: parse_arg(args.get(1).copied(), USAGE)?,
            }
        }
        "suspend" => Command::Suspend {
            days: parse_arg(args.first().copied(), "suspend <days>")?,
        },
        "pending" => Command::Pending,
        "approve" => Command::Approve(parse_arg(args.first().copied(), "approve <request-id>")?),
        "reject" => Command::Reject(parse_arg(args.first().copied(), "reject <request-id>")?),
        "report" => Command::Report,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(Error::Validation {
                message: format!("unknown command '{other}', type 'help'"),
            });
        }
    };
    Ok(Some(command))
}
