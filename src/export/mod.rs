pub mod console;
pub mod json;

pub use console::print_report;
pub use json::{default_report_path, save_report};
