pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;

pub use config::{Config, Strategy};
pub use error::{AppErr, Result};
