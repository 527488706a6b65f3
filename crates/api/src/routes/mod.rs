//! HTTP route handlers.

pub mod animals;
pub mod enclosures;
pub mod health;
pub mod metrics;
pub mod schedules;
pub mod statistics;

use std::str::FromStr;

use crate::error::ApiError;

/// Parses an id taken from the request path or body.
fn parse_id<T>(kind: &str, raw: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid {kind} id '{raw}': {e}")))
}
