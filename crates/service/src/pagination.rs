//! Pagination utilities for service layer
//!
//! Offset based paging: `limit` records starting at `offset`.

use serde::Deserialize;

use crate::errors::ServiceError;

/// Largest `limit`/`offset` the store accepts; it binds both as signed 64-bit.
pub const MAX_BOUND: u64 = i64::MAX as u64;

/// Pagination parameters; absent values fall back to the configured defaults.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Pagination {
    /// items per page, >= 1
    pub limit: Option<u64>,
    /// records to skip
    pub offset: Option<u64>,
}

impl Pagination {
    pub fn new(limit: u64, offset: u64) -> Self { Self { limit: Some(limit), offset: Some(offset) } }

    /// Resolve against `default_limit`, returning `(limit, offset)`.
    pub fn resolve(self, default_limit: u64) -> Result<(u64, u64), ServiceError> {
        let limit = self.limit.unwrap_or(default_limit);
        if limit == 0 {
            return Err(ServiceError::Validation("limit must be >= 1".into()));
        }
        if limit > MAX_BOUND {
            return Err(ServiceError::Validation(format!("limit must be <= {MAX_BOUND}")));
        }
        let offset = self.offset.unwrap_or(0);
        if offset > MAX_BOUND {
            return Err(ServiceError::Validation(format!("offset must be <= {MAX_BOUND}")));
        }
        Ok((limit, offset))
    }
}
