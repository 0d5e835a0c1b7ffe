//! CLI-specific utilities for butterfly-guidance
//!
//! This module contains code specific to the command-line interface,
//! separate from the core library functionality.

pub mod summary;

pub use summary::{print_summary, summarize};
