//! Fraud-case row types for the bank verification agent.
//!
//! A `FraudCase` is projected straight from the `transactions` table in
//! `parley-db`; there is no intermediate cache. JSON field names keep the
//! column spelling so dumps match the stored schema.

use serde::{Deserialize, Serialize};

/// Review status of a flagged transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// The customer confirmed the charge as their own.
    ConfirmedSafe,
    /// The customer denied the charge.
    ConfirmedFraud,
    /// Flagged automatically, not yet reviewed with the customer.
    PendingReview,
}

impl CaseStatus {
    /// The canonical string stored in the `case_status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConfirmedSafe => "confirmed_safe",
            Self::ConfirmedFraud => "confirmed_fraud",
            Self::PendingReview => "pending_review",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CaseStatus {
    type Err = ParseCaseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed_safe" => Ok(Self::ConfirmedSafe),
            "confirmed_fraud" => Ok(Self::ConfirmedFraud),
            "pending_review" => Ok(Self::PendingReview),
            _ => Err(ParseCaseStatusError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown case status string.
#[derive(Debug, Clone)]
pub struct ParseCaseStatusError(pub String);

impl std::fmt::Display for ParseCaseStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown case status: {}", self.0)
    }
}

impl std::error::Error for ParseCaseStatusError {}

/// One row of the `transactions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudCase {
    pub id: i64,
    pub user_name: String,
    /// Stored as text to preserve leading zeros.
    pub security_id: String,
    /// Last four digits of the card, stored as text.
    pub card_ending: String,
    pub transaction_description: String,
    pub transaction_amount: f64,
    pub transaction_time: String,
    pub transaction_website: String,
    #[serde(rename = "case_status")]
    pub case_status: CaseStatus,
    pub notes: String,
}
