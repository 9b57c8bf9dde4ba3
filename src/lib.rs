pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod funds;
pub mod providers;
pub mod routes;

#[cfg(test)]
mod test_support;

pub use error::{FundtrackError, Result};
