pub mod arch;
pub mod codec;
pub mod dataset;
pub mod error;
pub mod inference;
pub mod initialization;
pub mod optimization;
pub mod training;

pub use error::{MlErr, Result};
