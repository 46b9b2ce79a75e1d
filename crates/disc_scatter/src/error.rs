//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid sampler configuration and the single core-level failure: a first item that cannot
//! be placed inside the bounds.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot place an item of size {size} inside bounds of {width}x{height}")]
    Unplaceable { size: f32, width: f32, height: f32 },
}
