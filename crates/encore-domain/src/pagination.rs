//! Pagination types.

use serde::{Deserialize, Serialize};

/// Offset pagination shared across list endpoints.
///
/// - `page`: zero-based, default 0
/// - `size`: 1–100, default 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_size() -> u32 {
    5
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_size(),
        }
    }
}

impl PageRequest {
    pub const MAX_SIZE: u32 = 100;

    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Clamp `size` to the valid range 1–100.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            page: self.page,
            size: self.size.clamp(1, Self::MAX_SIZE),
        }
    }

    pub fn offset(self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn limit(self) -> u64 {
        u64::from(self.size)
    }
}
