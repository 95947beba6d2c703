//! Payment methods used to pay for memberships.
//!
//! New methods plug in by implementing [`PaymentMethod`]; the sales logic never needs
//! to change.

use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Something that can take money from a client.
pub trait PaymentMethod {
    /// Short name used in logs and the sales ledger
    fn name(&self) -> &'static str;

    /// Attempts to charge `amount`. Returns whether the charge went through.
    fn charge(&mut self, amount: f64) -> bool;
}

/// Card payment. Always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardPayment;

impl PaymentMethod for CardPayment {
    fn name(&self) -> &'static str {
        "card"
    }

    fn charge(&mut self, amount: f64) -> bool {
        info!("Processing card payment of ${:.2}", amount);
        true
    }
}

/// Cash payment at the front desk. Always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashPayment;

impl PaymentMethod for CashPayment {
    fn name(&self) -> &'static str {
        "cash"
    }

    fn charge(&mut self, amount: f64) -> bool {
        info!("Processing cash payment of ${:.2}", amount);
        true
    }
}

/// A payment method that refuses every charge and counts the attempts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecliningPayment {
    /// Number of charges attempted so far
    pub attempts: u32,
}

impl PaymentMethod for DecliningPayment {
    fn name(&self) -> &'static str {
        "declining"
    }

    fn charge(&mut self, amount: f64) -> bool {
        self.attempts += 1;
        info!("Declining payment of ${:.2}", amount);
        false
    }
}

/// Payment methods a client can choose in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    /// [`CardPayment`]
    Card,
    /// [`CashPayment`]
    Cash,
}

impl PaymentKind {
    /// Builds the payment method for this choice.
    #[must_use]
    pub fn into_method(self) -> Box<dyn PaymentMethod> {
        match self {
            Self::Card => Box::new(CardPayment),
            Self::Cash => Box::new(CashPayment),
        }
    }
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Card => "card",
            Self::Cash => "cash",
        })
    }
}

impl FromStr for PaymentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            other => Err(format!("unknown payment method '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_card_and_cash_always_succeed() {
        assert!(CardPayment.charge(30.0));
        assert!(CashPayment.charge(100.0));
    }

    #[test]
    fn test_declining_payment_counts_attempts() {
        let mut method = DecliningPayment::default();
        assert!(!method.charge(50.0));
        assert!(!method.charge(50.0));
        assert_eq!(method.attempts, 2);
    }

    #[test]
    fn test_payment_kind_parsing() {
        assert_eq!("CARD".parse::<PaymentKind>().unwrap(), PaymentKind::Card);
        assert_eq!(PaymentKind::Cash.into_method().name(), "cash");
        assert!("crypto".parse::<PaymentKind>().is_err());
    }
}
