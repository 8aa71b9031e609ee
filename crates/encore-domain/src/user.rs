//! User domain types.

use serde::{Deserialize, Serialize};

/// Account role.
///
/// Wire format in storage: `u8` (0 = Listener, 1 = Artist, 2 = Admin).
/// JSON and token claims use the SCREAMING_SNAKE_CASE name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Listener = 0,
    Artist = 1,
    Admin = 2,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Listener),
            1 => Some(Self::Artist),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Listener => "LISTENER",
            Self::Artist => "ARTIST",
            Self::Admin => "ADMIN",
        }
    }

    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_u8().cmp(&other.as_u8())
    }
}

/// Account lifecycle status.
///
/// `Pending` until the email verification code is confirmed, then `Active`.
/// Only an admin moves an account between `Active` and `Blocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Pending = 0,
    Active = 1,
    Blocked = 2,
}

impl AccountStatus {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Pending),
            1 => Some(Self::Active),
            2 => Some(Self::Blocked),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
