use std::str::FromStr;

use axum::response::{Redirect, Response};

use toolcrib_core::DomainError;

use crate::app::errors;

/// Parse a path id; anything that is not an integer id is reported as not found.
pub fn parse_id<T>(raw: &str) -> Result<T, Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(errors::domain_error_to_response)
}

/// `303 See Other` back to the product listing.
pub fn back_to_index() -> Redirect {
    Redirect::to("/")
}
