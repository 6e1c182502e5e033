pub mod models;
pub mod parser;
pub mod format;
pub mod formulas;
pub mod registry;
pub mod services;
pub mod errors;

pub use models::*;
pub use parser::parse_number;
pub use format::{format_number, PLACEHOLDER};
pub use registry::*;
pub use services::*;
pub use errors::*;
