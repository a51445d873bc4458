use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::error::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT: &str = "createdAt,desc";

/// Query position of one list screen: `(page, size, sort)`.
///
/// `page` is zero-based. `sort` is an opaque `field,direction` descriptor
/// forwarded verbatim to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationState {
    pub page: u32,
    pub size: u32,
    pub sort: String,
}

impl PaginationState {
    pub fn new(page: u32, size: u32, sort: impl Into<String>) -> AppResult<Self> {
        if size == 0 {
            return Err(AppError::Validation {
                field: "size".to_string(),
                reason: "Page size must be greater than 0".to_string(),
            });
        }
        Ok(Self {
            page,
            size,
            sort: sort.into(),
        })
    }

    /// Mount state for a screen using the configured defaults.
    pub fn from_config(config: &PaginationConfig) -> Self {
        Self {
            page: 0,
            size: config.default_size.max(1),
            sort: config.default_sort.clone(),
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Changing the size invalidates the old offset, so the page resets to 0.
    pub fn with_size(&self, size: u32) -> AppResult<Self> {
        Self::new(0, size, self.sort.clone())
    }

    pub fn with_sort(&self, sort: impl Into<String>) -> Self {
        Self {
            page: 0,
            size: self.size,
            sort: sort.into(),
        }
    }

    /// Index of the first row on this page across the whole list.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: DEFAULT_SORT.to_string(),
        }
    }
}
