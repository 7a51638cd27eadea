mod config;
mod core;
mod dispatch;
mod engine;
mod errors;
mod storage;

pub use self::config::*;
pub use self::core::*;
pub use self::dispatch::*;
pub use self::engine::*;
pub use self::errors::{Error, Result};
pub use self::storage::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
