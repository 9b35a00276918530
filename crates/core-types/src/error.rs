// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The feed produced no steps (check the date filter and the SMA warm-up window)")]
    EmptyFeed,

    #[error("Invalid run configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
