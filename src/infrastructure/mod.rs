//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns like
//! configuration files, CSV batch files and the system clipboard.

pub mod config;
pub mod files;
pub mod clipboard;

pub use config::*;
pub use files::*;
pub use clipboard::*;
