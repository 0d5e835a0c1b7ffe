//! Common utilities for the butterfly-guidance toolkit

pub mod error;

pub use error::{Error, Result};
