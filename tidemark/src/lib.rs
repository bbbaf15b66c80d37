pub mod api;
pub mod config;
pub mod error;
pub mod query;
pub mod template;

pub use config::Config;
pub use error::{Error, Result};
