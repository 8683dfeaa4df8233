//! Export core modules shared by the CLI wrappers.

pub mod console_core;
pub mod json_core;

pub use console_core::{format_percent, render_report, write_report};
pub use json_core::{SavedProtocol, SavedReport};
