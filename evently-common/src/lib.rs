//! Common types shared between the registration API and evently-ui

pub mod auth;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Review status of a registration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Payment state reported by the payment processor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Submitted,
    Verified,
    Refunded,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseStatusError {
    kind: &'static str,
    value: String,
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ParseStatusError {
                kind: "registration status",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unpaid => write!(f, "unpaid"),
            Self::Submitted => write!(f, "submitted"),
            Self::Verified => write!(f, "verified"),
            Self::Refunded => write!(f, "refunded"),
        }
    }
}

/// Registrant as returned by the admin endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Registrant {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    pub event: String,
    #[serde(default)]
    pub ticket_type: Option<String>,
    #[serde(default)]
    pub status: RegistrationStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// Filename or URL of the uploaded payment screenshot
    #[serde(default)]
    pub payment_screenshot: Option<String>,
    /// Filename or URL of the uploaded identity document
    #[serde(default)]
    pub id_document: Option<String>,
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

impl Registrant {
    /// Case-insensitive match against name, email and organization
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
            || self
                .organization
                .as_deref()
                .map(|org| org.to_lowercase().contains(&query))
                .unwrap_or(false)
    }

    /// Uploaded documents paired with their display labels
    pub fn documents(&self) -> Vec<(&'static str, &str)> {
        let mut docs = Vec::new();
        if let Some(screenshot) = self.payment_screenshot.as_deref() {
            docs.push(("Payment screenshot", screenshot));
        }
        if let Some(id_doc) = self.id_document.as_deref() {
            docs.push(("Identity document", id_doc));
        }
        docs
    }
}
