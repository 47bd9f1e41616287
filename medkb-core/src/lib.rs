//! Medical knowledge source connectors and NLM journal list parsing

pub mod config;
pub mod connectors;
pub mod error;
pub mod harvest;
pub mod journals;
pub mod text;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod transport;
pub mod tree;

pub use error::{FetchError, MedkbError, Result};
