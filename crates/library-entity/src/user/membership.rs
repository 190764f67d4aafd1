//! Library membership of a user.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Whether a member may currently use the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "membership_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipStatus {
    /// Membership is in good standing.
    Active,
    /// Membership was blocked by an administrator.
    Blocked,
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Blocked => write!(f, "BLOCKED"),
        }
    }
}

/// A library membership record. Shares its primary key with the owning user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LibraryMember {
    /// Membership identifier (equal to the user id).
    pub id: i64,
    /// How to reach the member.
    pub contact_information: String,
    /// Current status.
    pub membership_status: MembershipStatus,
    /// Start of the membership period.
    pub membership_period: DateTime<Utc>,
}
